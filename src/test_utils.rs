//! Test utilities and shared configuration.
//!
//! Common helpers for unit tests and for downstream crates enabling the
//! `testing` feature.

use crate::config::Config;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Fixed signing instant used across tests: 2023-11-14T22:13:20Z.
pub const TEST_EPOCH_SECS: u64 = 1_700_000_000;

/// Returns [`TEST_EPOCH_SECS`] shifted by `offset_secs`.
#[must_use]
pub fn test_time(offset_secs: i64) -> SystemTime {
    let base = UNIX_EPOCH + Duration::from_secs(TEST_EPOCH_SECS);
    let shift = Duration::from_secs(offset_secs.unsigned_abs());
    if offset_secs >= 0 { base + shift } else { base - shift }
}

/// Creates a standard configuration for testing purposes.
///
/// Uses a one hour expiry, a non-AES passphrase secret and a distinct seed.
#[must_use]
pub fn create_test_config() -> Config {
    Config {
        cookie_secret: "test-passphrase".to_string(),
        cookie_seed: "test-seed".to_string(),
        cookie_name: "_session".to_string(),
        cookie_expiry_secs: 3600,
        cookie_secure: false,
        log_format: "pretty".to_string(),
    }
}
