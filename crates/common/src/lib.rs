// ================
// crates/common/src/lib.rs
// ================
//! Wire types shared by the Chirpy server and its clients.
//! Every request and response body the HTTP API speaks is defined here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Webhook event that upgrades an account to Chirpy Red
pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Body of `POST /api/users`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

/// Body of `PUT /api/users`
///
/// Both fields are required; the stored credential is replaced wholesale.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a user account
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub is_chirpy_red: bool,
}

/// Body of `POST /api/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Requested access token lifetime; clamped server-side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<i64>,
}

/// Successful login: the user plus an access token and a refresh token
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

/// Body of `POST /api/refresh` responses
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
}

/// Body of `POST /api/chirps`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateChirpRequest {
    pub body: String,
}

/// Public view of a chirp
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChirpResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

/// Billing webhook payload
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WebhookRequest {
    pub event: String,
    #[serde(default)]
    pub data: WebhookData,
}

/// Identity fields carried by a billing webhook
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct WebhookData {
    #[serde(default)]
    pub user_id: String,
}

/// Error envelope returned by every failing endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Stable error code plus a client-safe message
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Plain acknowledgement body
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}
