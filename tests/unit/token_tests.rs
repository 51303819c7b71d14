// ============================
// tests/unit/token_tests.rs
// ============================
//! Unit tests for session token issue and validation
use chirpy_backend_lib::auth::{TokenCodec, TokenError, DEFAULT_TOKEN_TTL_SECS};
use chrono::{Duration, Utc};
use uuid::Uuid;

const SECRET: &[u8] = b"unit-test-secret";

#[test]
fn test_issue_then_validate() {
    let codec = TokenCodec::new(SECRET);
    let identity = Uuid::new_v4();

    for ttl in [1, 60, 3600] {
        let token = codec.issue(identity, Some(ttl)).unwrap();
        assert_eq!(codec.validate(&token).unwrap(), identity);
    }
}

#[test]
fn test_negative_ttl_gets_default_lifetime() {
    let codec = TokenCodec::new(SECRET);
    let now = Utc::now();
    let token = codec.issue_at(Uuid::new_v4(), Some(-5), now).unwrap();

    let claims = codec.claims_at(&token, now).unwrap();
    assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_SECS);
    assert!(codec
        .validate_at(&token, now + Duration::seconds(3599))
        .is_ok());
}

#[test]
fn test_oversized_ttl_is_capped() {
    let codec = TokenCodec::new(SECRET);
    let now = Utc::now();
    let token = codec.issue_at(Uuid::new_v4(), Some(86_400), now).unwrap();

    assert!(matches!(
        codec.validate_at(&token, now + Duration::seconds(3600)),
        Err(TokenError::Expired)
    ));
}

#[test]
fn test_expired_at_and_after_deadline() {
    let codec = TokenCodec::new(SECRET);
    let now = Utc::now();
    let token = codec.issue_at(Uuid::new_v4(), Some(10), now).unwrap();

    assert!(codec.validate_at(&token, now + Duration::seconds(9)).is_ok());
    assert!(matches!(
        codec.validate_at(&token, now + Duration::seconds(10)),
        Err(TokenError::Expired)
    ));
    assert!(matches!(
        codec.validate_at(&token, now + Duration::hours(2)),
        Err(TokenError::Expired)
    ));
}

#[test]
fn test_different_secret_is_a_signature_failure() {
    let token = TokenCodec::new(SECRET).issue(Uuid::new_v4(), None).unwrap();
    let other = TokenCodec::new(b"another-secret");

    assert!(matches!(other.validate(&token), Err(TokenError::Signature)));
}

#[test]
fn test_garbage_is_malformed() {
    let codec = TokenCodec::new(SECRET);
    for token in ["", "abc", "a.b.c"] {
        assert!(matches!(codec.validate(token), Err(TokenError::Malformed(_))));
    }
}
