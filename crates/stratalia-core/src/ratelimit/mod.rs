//! Per-process request throttling with suspicious-activity blocking.
//!
//! Clients are identified by a coarse fingerprint of IP address and user
//! agent. Each endpoint [`Category`] has its own [`RateLimitPolicy`]; a client
//! that trips the suspicious-activity threshold is blocked for the policy's
//! block duration.

pub mod fingerprint;
pub mod limiter;
pub mod policy;

pub use fingerprint::{client_ip, fingerprint, is_bot_agent, ClientSignals};
pub use limiter::{LimiterStats, RateLimiter, Verdict};
pub use policy::{Category, Policies, RateLimitPolicy};
