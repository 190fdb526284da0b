//! Cookie signing.
//!
//! Implements HMAC signing and time-bounded verification for session cookies
//! in the `value|timestamp|signature` wire format.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;
type HmacSha1 = Hmac<Sha1>;

const FIELD_SEPARATOR: char = '|';
const NANOS_PER_SEC: i128 = 1_000_000_000;

/// How far in the future a cookie timestamp may lie before it is rejected.
pub const CLOCK_SKEW_TOLERANCE: Duration = Duration::from_secs(5 * 60);

/// Hash functions a cookie signature may be computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// HMAC-SHA256, used for every newly issued cookie.
    Sha256,
    /// HMAC-SHA1, accepted only so cookies issued before the switch to
    /// SHA-256 keep working.
    Sha1,
}

impl SignatureAlgorithm {
    /// Returns `true` for algorithms kept only for verification.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::Sha1)
    }

    fn digest(self, seed: &[u8], fields: &[&str]) -> Vec<u8> {
        match self {
            Self::Sha256 => keyed_digest::<HmacSha256>(seed, fields),
            Self::Sha1 => keyed_digest::<HmacSha1>(seed, fields),
        }
    }
}

/// Algorithms tried during verification, in order.
// TODO: drop Sha1 once every live cookie has been re-issued under SHA-256.
pub const VERIFICATION_ORDER: [SignatureAlgorithm; 2] =
    [SignatureAlgorithm::Sha256, SignatureAlgorithm::Sha1];

/// Why a cookie was rejected. Only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RejectReason {
    Malformed,
    SignatureMismatch,
    Expired,
    ClockSkew,
}

impl RejectReason {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::SignatureMismatch => "signature_mismatch",
            Self::Expired => "expired",
            Self::ClockSkew => "clock_skew",
        }
    }
}

/// A cookie that passed signature and expiration checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCookie {
    /// The decoded payload.
    pub value: Vec<u8>,
    /// When the cookie was signed, at one-second resolution.
    pub signed_at: SystemTime,
}

/// Computes an HMAC over the concatenated fields.
///
/// # Panics
///
/// Never in practice: HMAC accepts keys of any length.
fn keyed_digest<M: Mac + KeyInit>(seed: &[u8], fields: &[&str]) -> Vec<u8> {
    let mut mac = <M as KeyInit>::new_from_slice(seed).expect("HMAC accepts any key size");
    for field in fields {
        mac.update(field.as_bytes());
    }
    mac.finalize().into_bytes().to_vec()
}

fn cookie_signature(
    algorithm: SignatureAlgorithm,
    seed: &str,
    name: &str,
    encoded_value: &str,
    timestamp: &str,
) -> Vec<u8> {
    algorithm.digest(seed.as_bytes(), &[name, encoded_value, timestamp])
}

/// Unix seconds for `t`, rounded towards negative infinity.
fn unix_seconds(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            if before.subsec_nanos() > 0 {
                secs.saturating_add(1).saturating_neg()
            } else {
                secs.saturating_neg()
            }
        }
    }
}

fn system_time_from_unix(secs: i64) -> Option<SystemTime> {
    let offset = Duration::from_secs(secs.unsigned_abs());
    if secs >= 0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    }
}

pub(crate) fn sign_value_with(
    algorithm: SignatureAlgorithm,
    seed: &str,
    name: &str,
    value: &[u8],
    now: SystemTime,
) -> String {
    let encoded_value = STANDARD.encode(value);
    let timestamp = unix_seconds(now).to_string();
    let signature = cookie_signature(algorithm, seed, name, &encoded_value, &timestamp);
    format!(
        "{encoded_value}{FIELD_SEPARATOR}{timestamp}{FIELD_SEPARATOR}{}",
        STANDARD.encode(signature)
    )
}

/// Signs `value` for the cookie called `name`, stamped with `now`.
///
/// The result has the form `base64(value)|unix_seconds|base64(hmac)`, where
/// the HMAC-SHA256 is keyed with `seed` and covers the cookie name, the
/// encoded value and the timestamp concatenated without separators.
#[must_use]
pub fn sign_value(seed: &str, name: &str, value: &[u8], now: SystemTime) -> String {
    sign_value_with(SignatureAlgorithm::Sha256, seed, name, value, now)
}

/// Checks a supplied base64 signature against every accepted algorithm.
fn matching_algorithm(
    supplied: &str,
    seed: &str,
    name: &str,
    encoded_value: &str,
    timestamp: &str,
) -> Option<SignatureAlgorithm> {
    let supplied = STANDARD.decode(supplied).ok()?;
    VERIFICATION_ORDER.into_iter().find(|&algorithm| {
        let expected = cookie_signature(algorithm, seed, name, encoded_value, timestamp);
        bool::from(supplied.as_slice().ct_eq(expected.as_slice()))
    })
}

fn check(
    cookie_value: &str,
    seed: &str,
    name: &str,
    expiration: Duration,
    now: SystemTime,
) -> Result<ValidatedCookie, RejectReason> {
    let parts: Vec<&str> = cookie_value.split(FIELD_SEPARATOR).collect();
    let [encoded_value, timestamp, signature] = parts.as_slice() else {
        return Err(RejectReason::Malformed);
    };

    let algorithm = matching_algorithm(signature, seed, name, encoded_value, timestamp)
        .ok_or(RejectReason::SignatureMismatch)?;
    if algorithm.is_legacy() {
        warn!(cookie = name, algorithm = ?algorithm, "Accepted cookie with legacy signature");
    }

    let signed_secs: i64 = timestamp.parse().map_err(|_| RejectReason::Malformed)?;

    let signed_ns = i128::from(signed_secs) * NANOS_PER_SEC;
    let now_ns = i128::from(unix_seconds(now)) * NANOS_PER_SEC;
    let expiration_ns = i128::try_from(expiration.as_nanos()).unwrap_or(i128::MAX);
    let skew_ns = i128::try_from(CLOCK_SKEW_TOLERANCE.as_nanos()).unwrap_or(i128::MAX);

    if signed_ns <= now_ns.saturating_sub(expiration_ns) {
        return Err(RejectReason::Expired);
    }
    if signed_ns >= now_ns.saturating_add(skew_ns) {
        return Err(RejectReason::ClockSkew);
    }

    let signed_at = system_time_from_unix(signed_secs).ok_or(RejectReason::Malformed)?;
    let value = STANDARD
        .decode(encoded_value)
        .map_err(|_| RejectReason::Malformed)?;

    Ok(ValidatedCookie { value, signed_at })
}

/// Validates a signed cookie value produced by [`sign_value`].
///
/// The cookie is accepted only if it has exactly three fields, its
/// signature matches under SHA-256 (or legacy SHA-1), and its timestamp lies
/// strictly inside `(now - expiration, now + CLOCK_SKEW_TOLERANCE)`, with
/// `now` taken at one-second resolution. Every failure yields `None`; the
/// reason is logged at debug level and never returned.
#[must_use]
pub fn validate(
    cookie_value: &str,
    seed: &str,
    name: &str,
    expiration: Duration,
    now: SystemTime,
) -> Option<ValidatedCookie> {
    match check(cookie_value, seed, name, expiration, now) {
        Ok(validated) => Some(validated),
        Err(reason) => {
            debug!(cookie = name, reason = reason.as_str(), "Rejected signed cookie");
            None
        }
    }
}

/// Signing context for one named cookie.
#[derive(Clone)]
pub struct CookieSigner {
    seed: String,
    name: String,
    expiration: Duration,
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner")
            .field("name", &self.name)
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

impl CookieSigner {
    /// Creates a signer for the cookie `name` using `seed` as the HMAC key.
    #[must_use]
    pub fn new(seed: impl Into<String>, name: impl Into<String>, expiration: Duration) -> Self {
        Self {
            seed: seed.into(),
            name: name.into(),
            expiration,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Signs `value` at `now`.
    #[must_use]
    pub fn sign(&self, value: &[u8], now: SystemTime) -> String {
        sign_value(&self.seed, &self.name, value, now)
    }

    /// Validates a cookie value previously produced by [`Self::sign`].
    #[must_use]
    pub fn validate(&self, cookie_value: &str, now: SystemTime) -> Option<ValidatedCookie> {
        validate(cookie_value, &self.seed, &self.name, self.expiration, now)
    }
}
