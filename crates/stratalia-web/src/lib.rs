//! HTTP server for Stratalia.
//!
//! [`build_app`] assembles the axum router from an [`AppState`]; `main`
//! only loads configuration and serves it.

pub mod api;
pub mod auth;
pub mod config;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod seed;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, Method};
use axum::middleware::from_fn;
use axum::Router;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

const BODY_LIMIT: usize = 1024 * 1024;

async fn not_found() -> AppError {
    AppError::NotFound("Endpoint niet gevonden".to_string())
}

pub fn build_app(state: AppState) -> anyhow::Result<Router> {
    let rate_limit_rpm = state.config.rate_limit.auth_requests_per_minute.max(1);

    // Per-IP burst limit in front of the auth endpoints
    let period_per_request = (60 / rate_limit_rpm).max(1);
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(period_per_request.into())
            .burst_size(rate_limit_rpm)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid auth rate limit configuration"))?,
    );

    let auth_routes = api::auth_router(&state)
        .layer(GovernorLayer::<_, _, axum::body::Body>::new(governor_config));

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([
            header::RETRY_AFTER,
            HeaderName::from_static("x-ratelimit-limit"),
            HeaderName::from_static("x-ratelimit-remaining"),
            HeaderName::from_static("x-ratelimit-reset"),
            HeaderName::from_static("x-request-id"),
        ]);

    let base_router = Router::new()
        .nest("/api", api::router(&state).merge(auth_routes))
        .fallback(not_found);

    let base_router = if state.config.tls_enabled() {
        base_router.layer(from_fn(middleware::security_headers::security_headers_with_hsts))
    } else {
        base_router.layer(from_fn(middleware::security_headers::security_headers))
    };

    Ok(base_router
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state))
}

/// Periodically drops expired limiter entries, cache entries and revoked
/// tokens.
pub fn spawn_cleanup(state: AppState) -> tokio::task::JoinHandle<()> {
    let every = Duration::from_secs(state.config.rate_limit.cleanup_interval_secs.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            state.cleanup();
        }
    })
}
