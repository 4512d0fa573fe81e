use axum::body::Body;
use axum::http::{header, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Sent on every API response.
const API_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
    ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
];

const HSTS: &str = "max-age=31536000; includeSubDomains";

fn harden(response: &mut Response, hsts: bool) {
    let headers = response.headers_mut();
    for (name, value) in API_HEADERS {
        headers.insert(*name, HeaderValue::from_static(value));
    }
    // Handlers may opt into caching by setting their own value.
    if !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    if hsts {
        headers.insert(header::STRICT_TRANSPORT_SECURITY, HeaderValue::from_static(HSTS));
    }
}

pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    harden(&mut response, false);
    response
}

/// [`security_headers`] plus `Strict-Transport-Security`, for TLS listeners.
pub async fn security_headers_with_hsts(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    harden(&mut response, true);
    response
}
