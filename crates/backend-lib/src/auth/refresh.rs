// ============================
// crates/backend-lib/src/auth/refresh.rs
// ============================
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
/** Refresh token generation.
Refresh tokens are opaque random strings recorded server-side, unlike the
stateless access tokens. Renewal and revocation operate on that record. */
use chrono::Duration;
use rand::RngCore;

/// Refresh token size in bytes (256 bits of entropy)
const REFRESH_TOKEN_BYTES: usize = 32;

/// How long a refresh token stays usable, in days
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Lifetime of a newly issued refresh token
pub fn refresh_token_ttl() -> Duration {
    Duration::days(REFRESH_TOKEN_TTL_DAYS)
}

/** Generate a cryptographically secure refresh token
# Returns
A base64 URL-safe encoded string without padding */
pub fn generate_refresh_token() -> String {
    let mut buffer = [0u8; REFRESH_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}
