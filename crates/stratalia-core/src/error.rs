//! Error types for `stratalia-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

/// Unified error type for all core operations.
///
/// The web layer maps each variant onto an HTTP status and error code, so
/// variants describe what went wrong from the caller's point of view.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested record does not exist (or is not active).
    #[error("not found: {0}")]
    NotFound(String),

    /// Input failed a domain rule.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// The record already exists or is in a state that forbids the change.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller is not allowed to perform the operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Email/password combination did not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account has been blocked by an administrator.
    #[error("account blocked")]
    AccountBlocked,

    /// A seed document could not be parsed.
    #[error("seed parse error: {0}")]
    SeedParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::Validation`] on `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout `stratalia-core`.
pub type CoreResult<T> = Result<T, CoreError>;
