// ============================
// tests/unit/password_tests.rs
// ============================
//! Unit tests for credential hashing
use chirpy_backend_lib::auth::{AuthError, CredentialHasher};

fn hasher() -> CredentialHasher {
    CredentialHasher::from_cost(4, 8, 1).unwrap()
}

#[test]
fn test_password_hashing_and_verification() {
    let hasher = hasher();
    let hash = hasher.hash("correct-horse").unwrap();

    assert_ne!(hash, "correct-horse");
    assert!(hash.starts_with("$scrypt$"));
    assert!(hasher.verify("correct-horse", &hash).is_ok());
    assert!(matches!(
        hasher.verify("wrong-pass", &hash),
        Err(AuthError::CredentialMismatch)
    ));
}

#[test]
fn test_salt_differs_per_call() {
    let hasher = hasher();
    let first = hasher.hash("same").unwrap();
    let second = hasher.hash("same").unwrap();

    assert_ne!(first, second);
    assert!(hasher.verify("same", &first).is_ok());
    assert!(hasher.verify("same", &second).is_ok());
}

#[test]
fn test_malformed_hash_is_a_mismatch() {
    let hasher = hasher();
    for stored in ["", "not-a-hash", "$scrypt$garbage"] {
        assert!(matches!(
            hasher.verify("anything", stored),
            Err(AuthError::CredentialMismatch)
        ));
    }
}

#[test]
fn test_unknown_account_looks_like_wrong_password() {
    let hasher = hasher();
    let hash = hasher.hash("correct-horse").unwrap();

    let missing = hasher.verify_user("correct-horse", None).unwrap_err();
    let wrong = hasher.verify_user("wrong-pass", Some(&hash)).unwrap_err();
    assert_eq!(missing.to_string(), wrong.to_string());
    assert!(hasher.verify_user("correct-horse", Some(&hash)).is_ok());
}

#[tokio::test]
async fn test_blocking_wrappers() {
    let hasher = hasher();
    let hash = hasher.hash_blocking("correct-horse".to_string()).await.unwrap();

    assert!(hasher
        .verify_user_blocking("correct-horse".to_string(), Some(hash.clone()))
        .await
        .is_ok());
    assert!(hasher
        .verify_user_blocking("wrong-pass".to_string(), Some(hash))
        .await
        .is_err());
}
