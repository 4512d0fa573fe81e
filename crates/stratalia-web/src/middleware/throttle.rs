use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request};
use axum::middleware::Next;
use axum::response::Response;
use stratalia_core::ratelimit::client_ip;
use stratalia_core::{Category, ClientSignals, RateLimiter, Verdict};

use crate::error::AppError;

/// Limiter state for one route group.
#[derive(Clone)]
pub struct Throttle {
    pub limiter: Arc<RateLimiter>,
    pub category: Category,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

pub fn client_signals(req: &Request<Body>) -> ClientSignals {
    let headers = req.headers();
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    ClientSignals {
        ip: client_ip(
            header_str(headers, "x-forwarded-for"),
            header_str(headers, "x-real-ip"),
            header_str(headers, "cf-connecting-ip"),
            peer.as_deref(),
        ),
        user_agent: header_str(headers, header::USER_AGENT.as_str()).map(str::to_string),
        has_referer: headers.contains_key(header::REFERER),
        is_post: req.method() == Method::POST,
    }
}

/// Whole seconds, rounded up, never below one.
fn retry_secs(d: Duration) -> u64 {
    (d.as_secs() + u64::from(d.subsec_nanos() > 0)).max(1)
}

pub async fn throttle(
    State(throttle): State<Throttle>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let signals = client_signals(&req);
    let verdict = throttle
        .limiter
        .check(throttle.category, &signals, Instant::now());

    let (code, message, retry_after) = match verdict {
        Verdict::Allowed {
            limit,
            remaining,
            reset_after,
        } => {
            let mut response = next.run(req).await;
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", HeaderValue::from(limit));
            headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
            headers.insert("x-ratelimit-reset", HeaderValue::from(retry_secs(reset_after)));
            return Ok(response);
        }
        Verdict::Blocked { retry_after } => (
            "CLIENT_BLOCKED",
            "Je bent tijdelijk geblokkeerd vanwege verdachte activiteit.",
            retry_after,
        ),
        Verdict::SuspiciousBlocked { retry_after } => (
            "SUSPICIOUS_ACTIVITY_BLOCKED",
            "Verdachte activiteit gedetecteerd. Je bent tijdelijk geblokkeerd.",
            retry_after,
        ),
        Verdict::Limited { retry_after } => (
            "RATE_LIMIT_EXCEEDED",
            "Te veel verzoeken. Probeer het later opnieuw.",
            retry_after,
        ),
    };

    tracing::debug!(
        "Throttled {} {} for {}",
        req.method(),
        req.uri().path(),
        signals.fingerprint()
    );
    Err(AppError::RateLimited {
        code,
        message: message.to_string(),
        retry_after_secs: retry_secs(retry_after),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use axum::routing::{get, post};
    use axum::Router;
    use stratalia_core::ratelimit::{Policies, RateLimitPolicy};
    use tower::ServiceExt;

    fn app(category: Category, policy: RateLimitPolicy) -> Router {
        let mut overrides = HashMap::new();
        overrides.insert(category, policy);
        let throttle_state = Throttle {
            limiter: Arc::new(RateLimiter::new(Policies::with_overrides(&overrides))),
            category,
        };
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route("/submit", post(|| async { "ok" }))
            .route_layer(from_fn_with_state(throttle_state, throttle))
    }

    fn browser_get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("x-forwarded-for", "203.0.113.7")
            .header(header::USER_AGENT, "Mozilla/5.0 (test)")
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn forwarded_for_wins_over_peer() {
        let mut req = browser_get("/ping");
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 4000))));
        let signals = client_signals(&req);
        assert_eq!(signals.ip, "203.0.113.7");
        assert!(!signals.is_post);
        assert!(!signals.has_referer);
    }

    #[test]
    fn peer_address_is_the_fallback() {
        let mut req = Request::builder().uri("/ping").body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 4000))));
        assert_eq!(client_signals(&req).ip, "10.0.0.1");
    }

    #[test]
    fn retry_rounds_up() {
        assert_eq!(retry_secs(Duration::from_millis(1500)), 2);
        assert_eq!(retry_secs(Duration::ZERO), 1);
        assert_eq!(retry_secs(Duration::from_secs(60)), 60);
    }

    #[tokio::test]
    async fn allowed_requests_carry_limit_headers() {
        let app = app(Category::Default, RateLimitPolicy::new(60, 2, 60, 5));
        let response = app.clone().oneshot(browser_get("/ping")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-ratelimit-limit"], "2");
        assert_eq!(response.headers()["x-ratelimit-remaining"], "1");

        app.clone().oneshot(browser_get("/ping")).await.unwrap();
        let limited = app.oneshot(browser_get("/ping")).await.unwrap();
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(limited.headers().contains_key(header::RETRY_AFTER));
    }

    #[tokio::test]
    async fn post_without_referer_gets_blocked() {
        let app = app(Category::Default, RateLimitPolicy::new(60, 10, 300, 1));
        let req = Request::builder()
            .method(Method::POST)
            .uri("/submit")
            .header("x-forwarded-for", "203.0.113.8")
            .header(header::USER_AGENT, "Mozilla/5.0 (test)")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "300");

        // Same client, now well-behaved, is still serving the block.
        let get = Request::builder()
            .uri("/ping")
            .header("x-forwarded-for", "203.0.113.8")
            .header(header::USER_AGENT, "Mozilla/5.0 (test)")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(get).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
