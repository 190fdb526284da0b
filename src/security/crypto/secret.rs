//! Secret normalization.
//!
//! Turns an operator-supplied secret string into raw key bytes, preferring a
//! base64url-decoded form only when it yields a valid AES key length.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use rand::Rng;

/// Key lengths accepted by AES-128, AES-192 and AES-256.
pub const AES_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

const GENERATED_SECRET_LEN: usize = 32;

/// Unpadded URL-safe decoder that tolerates non-zero trailing bits.
const LENIENT_URL_SAFE_NO_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Returns `true` if `len` is a valid AES key length.
#[must_use]
pub fn is_aes_key_length(len: usize) -> bool {
    AES_KEY_LENGTHS.contains(&len)
}

/// Normalizes a secret into key bytes.
///
/// Trailing `=` padding is stripped and the remainder decoded as unpadded
/// base64url. The decoded bytes are used only if their length is 16, 24 or
/// 32; otherwise the secret's own bytes are returned unchanged, so a
/// passphrase that happens to be valid base64 is never reinterpreted.
#[must_use]
pub fn normalize(secret: &str) -> Vec<u8> {
    match LENIENT_URL_SAFE_NO_PAD.decode(secret.trim_end_matches('=')) {
        Ok(decoded) if is_aes_key_length(decoded.len()) => decoded,
        _ => secret.as_bytes().to_vec(),
    }
}

/// Generates a fresh 32-byte secret encoded as padded base64url.
#[must_use]
pub fn generate_secret() -> String {
    let bytes: [u8; GENERATED_SECRET_LEN] = rand::rng().random();
    URL_SAFE.encode(bytes)
}
