use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::header;
use stratalia_core::{Account, Role};

use crate::error::AppError;
use crate::state::AppState;

/// A signed-in, non-blocked account.
pub struct AuthUser {
    pub account: Account,
    pub jti: String,
    /// Token expiry as a unix timestamp.
    pub exp: u64,
}

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.account.id
    }

    pub fn is_admin(&self) -> bool {
        self.account.role == Role::Admin
    }
}

fn bearer(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::Unauthorized("Ongeldige authorization header".to_string()))?;
    value
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or_else(|| AppError::Unauthorized("Ongeldige authorization header".to_string()))
}

fn authenticate(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = super::jwt::verify_token(&state.config.auth.jwt_secret, token)
        .map_err(|_| AppError::Unauthorized("Ongeldige of verlopen token".to_string()))?;

    if state.revoked_tokens.contains_key(&claims.jti) {
        return Err(AppError::Unauthorized("Token is ingetrokken".to_string()));
    }

    let account = state
        .accounts
        .get(&claims.sub)
        .ok_or_else(|| AppError::Unauthorized("Account bestaat niet meer".to_string()))?;

    if account.blocked {
        tracing::warn!("Blocked account tried to authenticate: {}", account.id);
        return Err(AppError::Forbidden("Je account is geblokkeerd".to_string()));
    }

    Ok(AuthUser {
        account,
        jti: claims.jti,
        exp: claims.exp as u64,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer(parts)?
            .ok_or_else(|| AppError::Unauthorized("Inloggen vereist".to_string()))?;
        authenticate(token, state)
    }
}

/// Like [`AuthUser`] for routes that also serve anonymous visitors. A
/// missing header is `None`; a bad token is still rejected.
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer(parts)? {
            Some(token) => Ok(MaybeUser(Some(authenticate(token, state)?))),
            None => Ok(MaybeUser(None)),
        }
    }
}

pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!("Non-admin access to admin route: {}", user.id());
            return Err(AppError::Forbidden("Alleen voor beheerders".to_string()));
        }
        Ok(AdminUser(user))
    }
}
