use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{json, Value};
use stratalia_core::CoreError;

use crate::auth::middleware::AuthUser;
use crate::auth::{jwt, password};
use crate::dto::*;
use crate::envelope::ApiResponse;
use crate::error::AppError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

fn issue_token(state: &AppState, account: stratalia_core::Account) -> Result<AuthResponse, AppError> {
    let (token, expires_at) = jwt::create_token(
        &state.config.auth.jwt_secret,
        state.config.auth.jwt_ttl_hours,
        &account.id,
        account.role,
    )?;
    Ok(AuthResponse {
        token,
        expires_at,
        user: account,
    })
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, ApiResponse<AuthResponse>), AppError> {
    let email = body.email.trim().to_lowercase();
    if state.accounts.find_by_email(&email).is_some() {
        return Err(AppError::Conflict(
            "Er bestaat al een account met dit e-mailadres".to_string(),
        ));
    }

    let hash = password::hash_blocking(body.password).await?;
    let account = state
        .accounts
        .register(&email, body.full_name.trim(), hash)?;
    tracing::info!("Account registered: {}", account.id);

    Ok((StatusCode::CREATED, ApiResponse::ok(issue_token(&state, account)?)))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let email = body.email.trim().to_lowercase();
    let account = state
        .accounts
        .find_by_email(&email)
        .ok_or(CoreError::InvalidCredentials)?;

    let valid = password::verify_blocking(account.password_hash.clone(), body.password).await?;
    if !valid {
        tracing::warn!("Failed login attempt for account: {}", account.id);
        return Err(CoreError::InvalidCredentials.into());
    }
    if account.blocked {
        tracing::warn!("Login refused for blocked account: {}", account.id);
        return Err(CoreError::AccountBlocked.into());
    }

    tracing::info!("Login succeeded for account: {}", account.id);
    Ok(ApiResponse::ok(issue_token(&state, account)?))
}

pub async fn logout(user: AuthUser, State(state): State<AppState>) -> ApiResponse<Value> {
    state.revoked_tokens.insert(user.jti.clone(), user.exp);
    tracing::info!("Token revoked for account: {}", user.id());
    ApiResponse::ok(json!({ "logged_out": true }))
}

pub async fn me(user: AuthUser, State(state): State<AppState>) -> ApiResponse<MeResponse> {
    let points = state.points.get(user.id());
    ApiResponse::ok(MeResponse {
        user: user.account,
        points,
    })
}
