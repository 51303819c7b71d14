// ============================
// tests/integration/refresh_flow_tests.rs
// ============================
//! Refresh token exchange and revocation
use axum::http::{Method, StatusCode};
use chirpy_common::TokenResponse;
use crate::test_utils::{bearer, login, register, request, send, send_json, test_app, JWT_SECRET};
use chirpy_backend_lib::auth::TokenCodec;

#[tokio::test]
async fn test_refresh_then_revoke() {
    let (app, _state) = test_app();
    let walt = register(&app, "walt@example.com", "correct-horse").await;
    let session = login(&app, "walt@example.com", "correct-horse").await;
    let refresh = bearer(&session.refresh_token);

    let renewed: TokenResponse = send_json(
        &app,
        request(Method::POST, "/api/refresh", Some(&refresh), None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(
        TokenCodec::new(JWT_SECRET.as_bytes())
            .validate(&renewed.token)
            .unwrap(),
        walt.id
    );

    let (status, body) = send(&app, request(Method::POST, "/api/revoke", Some(&refresh), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, request(Method::POST, "/api/refresh", Some(&refresh), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tokens_are_not_interchangeable() {
    let (app, _state) = test_app();
    register(&app, "walt@example.com", "correct-horse").await;
    let session = login(&app, "walt@example.com", "correct-horse").await;

    // An access token is not a refresh token
    let (status, _) = send(
        &app,
        request(Method::POST, "/api/refresh", Some(&bearer(&session.token)), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A refresh token is not an access token
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/chirps",
            Some(&bearer(&session.refresh_token)),
            Some(serde_json::json!({ "body": "hi" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_refresh_token() {
    let (app, _state) = test_app();

    for uri in ["/api/refresh", "/api/revoke"] {
        let (status, _) = send(&app, request(Method::POST, uri, Some("Bearer unknown"), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(&app, request(Method::POST, uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
