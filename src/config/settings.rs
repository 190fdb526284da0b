//! Configuration settings.
//!
//! Defines the main `Config` struct and environment variable loading logic.

use std::env;
use std::time::Duration;

use super::error::{CookieError, Result};
use crate::core::cookie::DEFAULT_COOKIE_NAME;
use crate::security::crypto::{CookieSigner, is_aes_key_length, normalize};

const DEFAULT_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.is_empty())
    }

    fn get_required(&self, key: &str) -> Result<String> {
        self.get(key)
            .ok_or_else(|| CookieError::Config(format!("{key} must be set in environment")))
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .map_or(default, |v| v.eq_ignore_ascii_case("true") || v == "1")
    }

    fn get_u64_or(&self, key: &str, default: u64) -> Result<u64> {
        self.get(key).map_or(Ok(default), |v| {
            v.parse()
                .map_err(|_| CookieError::Config(format!("{key} must be a valid u64, got {v:?}")))
        })
    }
}

/// Application configuration loaded from environment.
#[derive(Clone)]
pub struct Config {
    /// Operator secret; see [`Config::secret_key`].
    pub cookie_secret: String,
    /// HMAC key for cookie signatures.
    pub cookie_seed: String,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Cookie lifetime in seconds.
    pub cookie_expiry_secs: u64,
    /// Whether `Set-Cookie` carries the `Secure` attribute.
    pub cookie_secure: bool,
    /// Logging format: "json" or "pretty".
    pub log_format: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("cookie_name", &self.cookie_name)
            .field("cookie_expiry_secs", &self.cookie_expiry_secs)
            .field("cookie_secure", &self.cookie_secure)
            .field("log_format", &self.log_format)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::Config`] if `COOKIE_SECRET` is missing or
    /// `COOKIE_EXPIRY_SECS` is not a valid number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset. `COOKIE_SEED` falls back to
    /// `COOKIE_SECRET`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let cookie_secret = vars.get_required("COOKIE_SECRET")?;
        let cookie_seed = vars.get_or("COOKIE_SEED", &cookie_secret);
        let cookie_expiry_secs = vars.get_u64_or("COOKIE_EXPIRY_SECS", DEFAULT_EXPIRY_SECS)?;
        if cookie_expiry_secs == 0 {
            return Err(CookieError::Config(
                "COOKIE_EXPIRY_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            cookie_secret,
            cookie_seed,
            cookie_name: vars.get_or("COOKIE_NAME", DEFAULT_COOKIE_NAME),
            cookie_expiry_secs,
            cookie_secure: vars.get_bool_or("COOKIE_SECURE", true),
            log_format: vars.get_or("LOG_FORMAT", "json"),
        })
    }

    /// Returns the normalized key bytes for `cookie_secret`.
    #[must_use]
    pub fn secret_key(&self) -> Vec<u8> {
        normalize(&self.cookie_secret)
    }

    /// Returns `true` if the normalized secret is a valid AES key.
    #[must_use]
    pub fn has_aes_secret(&self) -> bool {
        is_aes_key_length(self.secret_key().len())
    }

    #[must_use]
    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.cookie_expiry_secs)
    }

    /// Builds a signer for the configured cookie.
    #[must_use]
    pub fn signer(&self) -> CookieSigner {
        CookieSigner::new(
            self.cookie_seed.clone(),
            self.cookie_name.clone(),
            self.expiration(),
        )
    }
}
