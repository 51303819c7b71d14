// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP request handlers.

pub mod admin;
pub mod chirps;
pub mod session;
pub mod users;
pub mod webhooks;
