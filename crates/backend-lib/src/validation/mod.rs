// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request validation and the chirp text filter.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::error::AppError;

/// Longest chirp body accepted, in characters
pub const MAX_CHIRP_LENGTH: usize = 140;
const MAX_PASSWORD_LENGTH: usize = 1024;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

/// Words replaced by `PROFANITY_MASK` in chirp bodies
const PROFANE_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];
const PROFANITY_MASK: &str = "****";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Possible validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Chirp is too long")]
    ChirpTooLong,

    #[error("Invalid author_id: {0}")]
    InvalidAuthorId(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address cannot be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a new password. Only presence and an upper bound are enforced.
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password cannot be empty".to_string(),
        ));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} bytes"
        )));
    }

    Ok(password)
}

/// Validate a chirp body and return it with profanity masked
pub fn validate_chirp(body: &str) -> ValidationResult<String> {
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ValidationError::ChirpTooLong);
    }
    Ok(clean_chirp_body(body))
}

/// Mask profane words. Words are split on single spaces and compared
/// case-insensitively; punctuation attached to a word prevents a match.
pub fn clean_chirp_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                PROFANITY_MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the optional `author_id` query parameter
pub fn parse_author_id(raw: Option<&str>) -> ValidationResult<Option<uuid::Uuid>> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => uuid::Uuid::parse_str(raw)
            .map(Some)
            .map_err(|_| ValidationError::InvalidAuthorId(raw.to_string())),
    }
}
