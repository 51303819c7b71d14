// ============================
// tests/integration/admin_tests.rs
// ============================
//! Health, file server hit counting and the development reset
use std::fs;

use axum::http::{Method, StatusCode};
use crate::test_utils::{dev_app, register, request, send, send_json, test_app};
use chirpy_common::MessageResponse;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_healthz() {
    let (app, _state) = test_app();
    let (status, body) = send(&app, request(Method::GET, "/api/healthz", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_file_server_counts_hits() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("index.html"), "<h1>Welcome to Chirpy</h1>").unwrap();
    let (app, _state) = dev_app(root.path());

    for _ in 0..3 {
        let (status, body) = send(&app, request(Method::GET, "/app/index.html", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<h1>Welcome to Chirpy</h1>");
    }

    // API calls are not counted
    send(&app, request(Method::GET, "/api/healthz", None, None)).await;

    let (status, body) = send(&app, request(Method::GET, "/admin/metrics", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains("visited 3 times"));
}

#[tokio::test]
async fn test_reset_in_dev() {
    let root = TempDir::new().unwrap();
    let (app, state) = dev_app(root.path());
    register(&app, "walt@example.com", "correct-horse").await;
    send(&app, request(Method::GET, "/app/", None, None)).await;

    let reply: MessageResponse = send_json(
        &app,
        request(Method::POST, "/admin/reset", None, None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(reply.message, "All users deleted");
    assert_eq!(state.hits.load(std::sync::atomic::Ordering::Relaxed), 0);

    // The email is free again
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "email": "walt@example.com", "password": "x" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_reset_forbidden_outside_dev() {
    let (app, state) = test_app();
    let walt = register(&app, "walt@example.com", "correct-horse").await;

    let (status, _) = send(&app, request(Method::POST, "/admin/reset", None, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(state.storage.get_user_by_id(walt.id).await.unwrap().is_some());
}
