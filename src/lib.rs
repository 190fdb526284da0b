//! Library definitions.
//!
//! Exports secret normalization, the signed cookie codec, and the HTTP
//! cookie helpers built on top of it.

pub mod config;
pub mod core;
pub mod security;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
pub use config::{Config, CookieError, Result};
pub use core::cookie::{
    Cookie, DEFAULT_COOKIE_NAME, find_cookie, format_set_cookie, parse_cookie_header,
    validate_cookie,
};
pub use security::crypto::{
    CLOCK_SKEW_TOLERANCE, CookieSigner, SignatureAlgorithm, ValidatedCookie, generate_secret,
    normalize, sign_value, validate,
};
