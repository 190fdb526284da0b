mod common;

use base64::{Engine as _, engine::general_purpose::URL_SAFE, engine::general_purpose::URL_SAFE_NO_PAD};
use common::{HOUR, NAME, SEED, after, before, signed_at};
use cookieguard::{
    Config, Cookie, CookieSigner, find_cookie, normalize, sign_value, validate, validate_cookie,
};
use std::time::Duration;

#[test]
fn test_roundtrip_various_payloads() {
    let payloads: [&[u8]; 4] = [b"", b"user@example.com", &[0, 255, 124, 61, 10], &[0x7C; 300]];

    for payload in payloads {
        let cookie = sign_value(SEED, NAME, payload, signed_at());
        let validated = validate(&cookie, SEED, NAME, HOUR, signed_at())
            .expect("Freshly signed cookie rejected");

        assert_eq!(validated.value, payload.to_vec());
        assert_eq!(validated.signed_at, signed_at());
    }
}

#[test]
fn test_single_bit_tampering_rejected() {
    let cookie = sign_value(SEED, NAME, b"session-payload", signed_at());
    let original = cookie.as_bytes();

    for i in 0..original.len() {
        if original[i] == b'|' {
            continue;
        }
        for bit in 0..7 {
            let mut tampered = original.to_vec();
            tampered[i] ^= 1 << bit;
            let tampered = String::from_utf8(tampered).expect("ASCII stays UTF-8");

            assert!(
                validate(&tampered, SEED, NAME, HOUR, signed_at()).is_none(),
                "bit {bit} of byte {i} flipped but cookie still validated: {tampered}"
            );
        }
    }
}

#[test]
fn test_expiration_boundary() {
    let cookie = sign_value(SEED, NAME, b"v", signed_at());

    assert!(validate(&cookie, SEED, NAME, HOUR, after(59 * 60 + 59)).is_some());
    assert!(validate(&cookie, SEED, NAME, HOUR, after(3600)).is_none());
    assert!(validate(&cookie, SEED, NAME, HOUR, after(3601)).is_none());
}

#[test]
fn test_clock_skew_tolerance() {
    let cookie = sign_value(SEED, NAME, b"v", signed_at());

    // Verifier clock behind the signer by 4 and 6 minutes.
    assert!(validate(&cookie, SEED, NAME, HOUR, before(4 * 60)).is_some());
    assert!(validate(&cookie, SEED, NAME, HOUR, before(6 * 60)).is_none());
    assert!(validate(&cookie, SEED, NAME, HOUR, before(5 * 60)).is_none());
}

#[test]
fn test_wrong_field_counts_rejected() {
    let cookie = sign_value(SEED, NAME, b"v", signed_at());
    let parts: Vec<&str> = cookie.split('|').collect();

    let candidates = [
        String::new(),
        parts[0].to_string(),
        format!("{}|{}", parts[0], parts[1]),
        format!("{cookie}|extra"),
        format!("{cookie}|"),
    ];

    for candidate in candidates {
        assert!(
            validate(&candidate, SEED, NAME, HOUR, signed_at()).is_none(),
            "accepted {candidate:?}"
        );
    }
}

#[test]
fn test_garbage_inputs_rejected() {
    let inputs = [
        "|||",
        "||",
        "a|b|c",
        "aGk=|notanumber|AAAA",
        "aGk=|1700000000|%%%%",
        "\u{1F36A}|\u{1F36A}|\u{1F36A}",
    ];

    for input in inputs {
        assert!(validate(input, SEED, NAME, HOUR, signed_at()).is_none());
    }
}

#[test]
fn test_wrong_seed_rejected() {
    let cookie = sign_value(SEED, NAME, b"v", signed_at());
    assert!(validate(&cookie, "another-seed", NAME, HOUR, signed_at()).is_none());
}

#[test]
fn test_secret_normalization_cases() {
    let raw: Vec<u8> = (0u8..32).collect();
    assert_eq!(normalize(&URL_SAFE.encode(&raw)), raw);

    assert_eq!(normalize("hunter2pwd"), b"hunter2pwd".to_vec());

    let seventeen = URL_SAFE_NO_PAD.encode([0xABu8; 17]);
    assert_eq!(normalize(&seventeen), seventeen.as_bytes().to_vec());
}

#[test]
fn test_cookie_header_flow() {
    let signer = CookieSigner::new(SEED, NAME, HOUR);
    let set_cookie = signer.set_cookie_header(b"alice", signed_at(), true);
    assert!(set_cookie.starts_with("_session="));
    assert!(set_cookie.contains("; Secure;"));

    let value = set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, v)| v.to_string())
        .expect("Set-Cookie has no value");

    let header = format!("lang=en; {NAME}={value}; other=1");
    let cookie = find_cookie(&header, NAME).expect("Cookie not found in header");
    assert_eq!(cookie, Cookie::new(NAME, value));

    let validated = validate_cookie(&cookie, SEED, HOUR, after(30)).expect("Cookie rejected");
    assert_eq!(validated.value, b"alice".to_vec());
    assert!(signer.validate_header(&header, after(2 * 3600)).is_none());
}

#[test]
fn test_config_driven_signer() {
    let config = Config::from_lookup(|key| match key {
        "COOKIE_SECRET" => Some("operator-secret".to_string()),
        "COOKIE_EXPIRY_SECS" => Some("60".to_string()),
        _ => None,
    })
    .expect("Config failed to load");

    let signer = config.signer();
    assert_eq!(signer.expiration(), Duration::from_secs(60));

    let cookie = signer.sign(b"v", signed_at());
    assert!(signer.validate(&cookie, after(59)).is_some());
    assert!(signer.validate(&cookie, after(60)).is_none());
    assert!(validate(&cookie, "operator-secret", "_session", HOUR, signed_at()).is_some());
}
