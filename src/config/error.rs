//! Error types and result aliases.
//!
//! Defines the core `CookieError` enumeration and common `Result` type.

use thiserror::Error;

/// Errors raised outside the signing core.
#[derive(Debug, Error)]
pub enum CookieError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid operator input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for `CookieError`.
pub type Result<T> = std::result::Result<T, CookieError>;
