//! Cryptographic utilities.
//!
//! Provides secret normalization and signed cookie verification.

pub mod cookie;
pub mod secret;

pub use cookie::{
    CLOCK_SKEW_TOLERANCE, CookieSigner, SignatureAlgorithm, VERIFICATION_ORDER, ValidatedCookie,
    sign_value, validate,
};
pub use secret::{generate_secret, is_aes_key_length, normalize};
