//! Request extractors that run `validator` rules before the handler.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// JSON body that passed its `Validate` rules.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation {
                field: None,
                message: format!("Ongeldige JSON: {}", e.body_text()),
            })?;
        value.validate().map_err(into_app_error)?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that passed its `Validate` rules.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri).map_err(|e| AppError::Validation {
            field: None,
            message: format!("Ongeldige parameters: {}", e.body_text()),
        })?;
        value.validate().map_err(into_app_error)?;
        Ok(ValidatedQuery(value))
    }
}

/// Collapses validator output into one `VALIDATION_ERROR`: the first failing
/// field (alphabetically) is named and every message is joined with `; `.
pub fn into_app_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is ongeldig ({})", e.code))
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let field = fields
        .iter()
        .map(|(f, _)| f.as_str())
        .find(|f| *f != "__all__")
        .map(str::to_string);
    let message = fields
        .into_iter()
        .flat_map(|(_, messages)| messages)
        .collect::<Vec<_>>()
        .join("; ");

    AppError::Validation { field, message }
}
