// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::CredentialHasher;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "chirpy.toml";

/// Prefix for environment overrides, e.g. `CHIRPY_BIND_ADDR`
pub const ENV_PREFIX: &str = "CHIRPY_";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Directory served under `/app/`
    pub filepath_root: PathBuf,
    /// Deployment platform; admin reset only works on `dev`
    pub platform: String,
    /// HMAC secret for access tokens
    pub jwt_secret: String,
    /// Shared key of the billing webhook sender
    pub polka_key: String,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON
    pub log_json: bool,
    /// Password hashing cost
    pub password_hash: PasswordHashSettings,
}

/// scrypt cost parameters for new password hashes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PasswordHashSettings {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            filepath_root: PathBuf::from("."),
            platform: "prod".to_string(),
            jwt_secret: String::new(),
            polka_key: String::new(),
            log_level: "info".to_string(),
            log_json: false,
            password_hash: PasswordHashSettings::default(),
        }
    }
}

impl Default for PasswordHashSettings {
    fn default() -> Self {
        Self {
            log_n: scrypt::Params::RECOMMENDED_LOG_N,
            r: scrypt::Params::RECOMMENDED_R,
            p: scrypt::Params::RECOMMENDED_P,
        }
    }
}

impl PasswordHashSettings {
    pub fn hasher(&self) -> Result<CredentialHasher> {
        Ok(CredentialHasher::from_cost(self.log_n, self.r, self.p)?)
    }
}

impl Settings {
    /// Load settings from `chirpy.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from a specific TOML file and the environment.
    ///
    /// Later sources win: defaults, the file, `CHIRPY_*` variables, then the
    /// bare `JWT_SECRET`, `POLKA_KEY` and `PLATFORM` variables.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings: Settings = Self::figment(path.as_ref()).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&["JWT_SECRET", "POLKA_KEY", "PLATFORM"]))
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.is_empty() {
            bail!("jwt_secret must be set (JWT_SECRET)");
        }
        if self.polka_key.is_empty() {
            bail!("polka_key must be set (POLKA_KEY)");
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!("invalid log level '{}'", self.log_level);
        }
        self.password_hash.hasher()?;
        Ok(())
    }

    /// Whether development-only endpoints are enabled
    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}
