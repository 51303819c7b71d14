//! `Authorization` header parsing.
//!
//! End-user sessions use `Bearer <token>`; the billing webhook uses
//! `ApiKey <key>`. The two schemes are never interchangeable.
use axum::http::{header::AUTHORIZATION, HeaderMap};
use thiserror::Error;

/// Scheme prefix for session and refresh tokens
pub const BEARER_PREFIX: &str = "Bearer ";

/// Scheme prefix for the machine-to-machine service key
pub const API_KEY_PREFIX: &str = "ApiKey ";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    #[error("authorization header missing")]
    Missing,

    #[error("authorization header is not visible ASCII")]
    NotVisibleAscii,

    #[error("invalid authorization header format")]
    WrongScheme,

    #[error("authorization credential is empty")]
    Empty,
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_with_prefix(headers, BEARER_PREFIX)
}

/// Extract the key from `Authorization: ApiKey <key>`
pub fn extract_service_key(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_with_prefix(headers, API_KEY_PREFIX)
}

fn extract_with_prefix<'a>(headers: &'a HeaderMap, prefix: &str) -> Result<&'a str, HeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(HeaderError::Missing)?
        .to_str()
        .map_err(|_| HeaderError::NotVisibleAscii)?;
    if value.is_empty() {
        return Err(HeaderError::Missing);
    }

    let credential = value
        .strip_prefix(prefix)
        .ok_or(HeaderError::WrongScheme)?
        .trim();
    if credential.is_empty() {
        return Err(HeaderError::Empty);
    }
    Ok(credential)
}
