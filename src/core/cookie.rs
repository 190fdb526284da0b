//! HTTP cookie plumbing.
//!
//! Locates signed cookies in `Cookie` request headers and renders
//! `Set-Cookie` response headers for freshly signed values.

use std::time::{Duration, SystemTime};

use crate::security::crypto::{CookieSigner, ValidatedCookie, validate};

pub const DEFAULT_COOKIE_NAME: &str = "_session";

/// A single `name=value` cookie as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parses a `Cookie` request header into its pairs.
///
/// Segments without `=` are skipped. Surrounding whitespace and a pair of
/// enclosing double quotes around the value are removed.
#[must_use]
pub fn parse_cookie_header(header: &str) -> Vec<Cookie> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some(Cookie::new(name, value))
        })
        .collect()
}

/// Returns the first cookie called `name` in a `Cookie` header.
#[must_use]
pub fn find_cookie(header: &str, name: &str) -> Option<Cookie> {
    parse_cookie_header(header)
        .into_iter()
        .find(|cookie| cookie.name == name)
}

/// Validates `cookie` using its own name as the signed name.
#[must_use]
pub fn validate_cookie(
    cookie: &Cookie,
    seed: &str,
    expiration: Duration,
    now: SystemTime,
) -> Option<ValidatedCookie> {
    validate(&cookie.value, seed, &cookie.name, expiration, now)
}

#[must_use]
pub fn format_set_cookie(name: &str, value: &str, max_age: u64, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!("{name}={value}; HttpOnly{secure_flag}; SameSite=Lax; Path=/; Max-Age={max_age}")
}

impl CookieSigner {
    /// Signs `value` and renders it as a `Set-Cookie` header value whose
    /// `Max-Age` matches the signer's expiration.
    #[must_use]
    pub fn set_cookie_header(&self, value: &[u8], now: SystemTime, secure: bool) -> String {
        format_set_cookie(
            self.name(),
            &self.sign(value, now),
            self.expiration().as_secs(),
            secure,
        )
    }

    /// Finds this signer's cookie in a `Cookie` request header and validates it.
    #[must_use]
    pub fn validate_header(&self, header: &str, now: SystemTime) -> Option<ValidatedCookie> {
        let cookie = find_cookie(header, self.name())?;
        self.validate(&cookie.value, now)
    }
}
