pub mod security_headers;
pub mod throttle;
