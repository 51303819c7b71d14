// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the Chirpy message board server.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use crate::auth::{AuthGate, CredentialHasher, TokenCodec};
use crate::config::Settings;
use crate::storage::Storage;

pub use crate::router::create_router;

/// Application state shared across all handlers
pub struct AppState {
    /// Session token and service key checks
    pub gate: AuthGate,
    /// Password hashing
    pub hasher: CredentialHasher,
    /// Storage backend
    pub storage: Arc<dyn Storage>,
    /// Settings
    pub settings: Arc<Settings>,
    /// Requests served by the static file server
    pub hits: AtomicU64,
}

impl AppState {
    /// Create a new application state
    pub fn new(storage: Arc<dyn Storage>, settings: Settings) -> anyhow::Result<Self> {
        settings.validate()?;

        let codec = TokenCodec::new(settings.jwt_secret.as_bytes());
        let gate = AuthGate::new(codec, settings.polka_key.clone());
        let hasher = settings.password_hash.hasher()?;

        Ok(Self {
            gate,
            hasher,
            storage,
            settings: Arc::new(settings),
            hits: AtomicU64::new(0),
        })
    }
}
