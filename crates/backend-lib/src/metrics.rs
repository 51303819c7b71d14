// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_REJECTED: &str = "auth.rejected";
pub const LOGIN_SUCCEEDED: &str = "login.succeeded";
pub const LOGIN_FAILED: &str = "login.failed";
pub const USER_CREATED: &str = "user.created";
pub const CHIRP_CREATED: &str = "chirp.created";
pub const CHIRP_DELETED: &str = "chirp.deleted";
pub const WEBHOOK_UPGRADED: &str = "webhook.user_upgraded";
pub const FILESERVER_HITS: &str = "fileserver.hits";
