// ============================
// tests/unit/header_tests.rs
// ============================
//! Unit tests for `Authorization` header parsing
use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chirpy_backend_lib::auth::{extract_bearer, extract_service_key, HeaderError};

fn headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}

#[test]
fn test_bearer_cases() {
    assert_eq!(extract_bearer(&headers("Bearer abc")), Ok("abc"));
    assert_eq!(extract_bearer(&headers("Bearer   abc  ")), Ok("abc"));
    assert_eq!(extract_bearer(&HeaderMap::new()), Err(HeaderError::Missing));
    assert_eq!(extract_bearer(&headers("Bearer ")), Err(HeaderError::Empty));
    assert_eq!(
        extract_bearer(&headers("Basic abc")),
        Err(HeaderError::WrongScheme)
    );
    assert_eq!(
        extract_bearer(&headers("bearer abc")),
        Err(HeaderError::WrongScheme)
    );
}

#[test]
fn test_service_key_scheme_is_separate() {
    assert_eq!(extract_service_key(&headers("ApiKey k-123")), Ok("k-123"));
    assert_eq!(
        extract_service_key(&headers("Bearer k-123")),
        Err(HeaderError::WrongScheme)
    );
    assert_eq!(
        extract_bearer(&headers("ApiKey k-123")),
        Err(HeaderError::WrongScheme)
    );
}
