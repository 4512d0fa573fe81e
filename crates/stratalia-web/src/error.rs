use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use stratalia_core::CoreError;

use crate::envelope::{timestamp, Meta};

#[derive(Debug)]
pub enum AppError {
    Validation {
        field: Option<String>,
        message: String,
    },
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    RateLimited {
        code: &'static str,
        message: String,
        retry_after_secs: u64,
    },
    Internal(String),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::RateLimited { code, .. } => *code,
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    timestamp: String,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: ErrorDetail,
    meta: Meta,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let mut retry_after = None;

        let (message, field, details) = match self {
            AppError::Validation { field, message } => (message, field, None),
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => (msg, None, None),
            AppError::RateLimited {
                message,
                retry_after_secs,
                ..
            } => {
                retry_after = Some(retry_after_secs);
                (
                    message,
                    None,
                    Some(serde_json::json!({ "retry_after": retry_after_secs })),
                )
            }
            AppError::Internal(msg) => {
                // Log the real error server-side, return generic message to client
                tracing::error!("Internal error: {}", msg);
                ("Er is een interne fout opgetreden".to_string(), None, None)
            }
        };

        let body = ErrorBody {
            success: false,
            error: ErrorDetail {
                code,
                message,
                field,
                details,
                timestamp: timestamp(),
            },
            meta: Meta::now(None),
        };

        let mut response = (status, axum::Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(format!("{e:#}"))
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NotFound(what) => AppError::NotFound(format!("Niet gevonden: {what}")),
            CoreError::Validation { field, message } => AppError::Validation {
                field: Some(field),
                message,
            },
            CoreError::Conflict(msg) => AppError::Conflict(msg),
            CoreError::Forbidden(msg) => AppError::Forbidden(msg),
            CoreError::InvalidCredentials => {
                AppError::Unauthorized("Ongeldige inloggegevens".to_string())
            }
            CoreError::AccountBlocked => {
                AppError::Forbidden("Je account is geblokkeerd".to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
