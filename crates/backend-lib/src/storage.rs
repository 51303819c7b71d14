// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Storage abstraction with an in-memory implementation.
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chirpy_common::{ChirpResponse, UserResponse};
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use crate::auth::{Identity, Owned};
use crate::error::AppError;

/// Stored user account
#[derive(Debug, Clone)]
pub struct User {
    pub id: Identity,
    pub email: String,
    pub hashed_password: String,
    pub is_chirpy_red: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

/// Stored chirp
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: Uuid,
    pub body: String,
    pub user_id: Identity,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Chirp {
    fn owner(&self) -> Identity {
        self.user_id
    }
}

impl From<Chirp> for ChirpResponse {
    fn from(chirp: Chirp) -> Self {
        Self {
            id: chirp.id,
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body,
            user_id: chirp.user_id,
        }
    }
}

/// Server-side record of a refresh token
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Identity,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Usable for renewal at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}

/// Trait for storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create a user; emails are unique
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn get_user_by_id(&self, id: Identity) -> Result<Option<User>, AppError>;

    /// Replace a user's email and credential
    async fn update_user(
        &self,
        id: Identity,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, AppError>;

    /// Mark a user as a Chirpy Red subscriber
    async fn upgrade_user(&self, id: Identity) -> Result<User, AppError>;

    /// Delete every user together with their chirps and refresh tokens
    async fn delete_all_users(&self) -> Result<(), AppError>;

    async fn create_chirp(&self, user_id: Identity, body: &str) -> Result<Chirp, AppError>;

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, AppError>;

    /// All chirps, optionally by one author, oldest first
    async fn list_chirps(&self, author: Option<Identity>) -> Result<Vec<Chirp>, AppError>;

    async fn delete_chirp(&self, id: Uuid) -> Result<(), AppError>;

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Identity,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError>;

    async fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError>;

    /// Stamp `revoked_at`; revoking twice keeps the first timestamp
    async fn revoke_refresh_token(&self, token: &str, at: DateTime<Utc>) -> Result<(), AppError>;
}

/// In-memory implementation of the Storage trait
#[derive(Debug, Default)]
pub struct MemoryStorage {
    users: DashMap<Identity, User>,
    emails: DashMap<String, Identity>,
    /// Chirps keyed by id, tagged with insertion order to break timestamp ties
    chirps: DashMap<Uuid, (u64, Chirp)>,
    chirp_seq: AtomicU64,
    refresh_tokens: DashMap<String, RefreshToken>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("user".to_string())
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        };

        match self.emails.entry(email.to_string()) {
            Entry::Occupied(_) => {
                return Err(AppError::Conflict("email already registered".to_string()))
            },
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            },
        }
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let Some(id) = self.emails.get(email).map(|entry| *entry) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn get_user_by_id(&self, id: Identity) -> Result<Option<User>, AppError> {
        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn update_user(
        &self,
        id: Identity,
        email: &str,
        hashed_password: &str,
    ) -> Result<User, AppError> {
        let current_email = self
            .users
            .get(&id)
            .map(|user| user.email.clone())
            .ok_or_else(user_not_found)?;

        if current_email != email {
            match self.emails.entry(email.to_string()) {
                Entry::Occupied(_) => {
                    return Err(AppError::Conflict("email already registered".to_string()))
                },
                Entry::Vacant(slot) => {
                    slot.insert(id);
                },
            }
            self.emails.remove(&current_email);
        }

        let mut user = self.users.get_mut(&id).ok_or_else(user_not_found)?;
        user.email = email.to_string();
        user.hashed_password = hashed_password.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn upgrade_user(&self, id: Identity) -> Result<User, AppError> {
        let mut user = self.users.get_mut(&id).ok_or_else(user_not_found)?;
        user.is_chirpy_red = true;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete_all_users(&self) -> Result<(), AppError> {
        self.refresh_tokens.clear();
        self.chirps.clear();
        self.emails.clear();
        self.users.clear();
        Ok(())
    }

    async fn create_chirp(&self, user_id: Identity, body: &str) -> Result<Chirp, AppError> {
        if !self.users.contains_key(&user_id) {
            return Err(user_not_found());
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            body: body.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        let seq = self.chirp_seq.fetch_add(1, Ordering::Relaxed);
        self.chirps.insert(chirp.id, (seq, chirp.clone()));
        Ok(chirp)
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, AppError> {
        Ok(self.chirps.get(&id).map(|entry| entry.1.clone()))
    }

    async fn list_chirps(&self, author: Option<Identity>) -> Result<Vec<Chirp>, AppError> {
        let mut chirps: Vec<(u64, Chirp)> = self
            .chirps
            .iter()
            .filter(|entry| author.map_or(true, |id| entry.1.user_id == id))
            .map(|entry| entry.value().clone())
            .collect();
        chirps.sort_by_key(|(seq, chirp)| (chirp.created_at, *seq));
        Ok(chirps.into_iter().map(|(_, chirp)| chirp).collect())
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<(), AppError> {
        self.chirps
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("chirp".to_string()))
    }

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Identity,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError> {
        if !self.users.contains_key(&user_id) {
            return Err(user_not_found());
        }

        let record = RefreshToken {
            token: token.to_string(),
            user_id,
            created_at: Utc::now(),
            expires_at,
            revoked_at: None,
        };
        match self.refresh_tokens.entry(token.to_string()) {
            Entry::Occupied(_) => Err(AppError::Conflict("refresh token collision".to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            },
        }
    }

    async fn get_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        Ok(self.refresh_tokens.get(token).map(|record| record.clone()))
    }

    async fn revoke_refresh_token(&self, token: &str, at: DateTime<Utc>) -> Result<(), AppError> {
        let mut record = self
            .refresh_tokens
            .get_mut(token)
            .ok_or_else(|| AppError::NotFound("refresh token".to_string()))?;
        record.revoked_at.get_or_insert(at);
        Ok(())
    }
}
