// ============================
// tests/unit/gate_tests.rs
// ============================
//! Unit tests for the authentication gate
use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chirpy_backend_lib::auth::{AuthError, AuthGate, Identity, Owned, TokenCodec};
use uuid::Uuid;

const SECRET: &[u8] = b"gate-secret";

struct Note {
    owner: Identity,
}

impl Owned for Note {
    fn owner(&self) -> Identity {
        self.owner
    }
}

fn gate() -> AuthGate {
    AuthGate::new(TokenCodec::new(SECRET), "service-key")
}

fn with_auth(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
    headers
}

#[test]
fn test_authenticate_user() {
    let gate = gate();
    let identity = Uuid::new_v4();
    let token = gate.codec().issue(identity, None).unwrap();

    let resolved = gate
        .authenticate_user(&with_auth(&format!("Bearer {token}")))
        .unwrap();
    assert_eq!(resolved, identity);

    let err = gate.authenticate_user(&HeaderMap::new()).unwrap_err();
    assert!(err.is_unauthorized());
    let err = gate
        .authenticate_user(&with_auth("Bearer not-a-token"))
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[test]
fn test_ownership_ordering() {
    let gate = gate();
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

    assert!(gate.authorize_owner(a, a).is_ok());
    assert!(matches!(gate.authorize_owner(b, a), Err(AuthError::Forbidden)));

    assert!(gate.authorize_resource(a, Some(Note { owner: a })).is_ok());
    assert!(matches!(
        gate.authorize_resource(b, Some(Note { owner: a })),
        Err(AuthError::Forbidden)
    ));
    assert!(matches!(
        gate.authorize_resource::<Note>(b, None),
        Err(AuthError::NotFound)
    ));
}

#[test]
fn test_authenticate_service() {
    let gate = gate();

    assert!(gate.authenticate_service(&with_auth("ApiKey service-key")).is_ok());
    assert!(gate
        .authenticate_service(&with_auth("ApiKey other-key"))
        .unwrap_err()
        .is_unauthorized());
    assert!(gate
        .authenticate_service(&with_auth("Bearer service-key"))
        .unwrap_err()
        .is_unauthorized());
}
