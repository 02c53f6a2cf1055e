//! User entity.

use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::EmailAddress;

/// A buyer. Created lazily on the first login-code request for an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub username: String,
    /// Argon2 hash of the latest one-time code, if one was ever issued.
    pub password_hash: Option<String>,
    pub verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Registers a new, unverified user whose username is the email address.
    pub fn register(id: UserId, email: EmailAddress, now: Timestamp) -> Self {
        Self {
            id,
            username: email.as_str().to_string(),
            email,
            password_hash: None,
            verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the stored credential with a fresh code hash.
    pub fn set_code_hash(&mut self, hash: String, now: Timestamp) {
        self.password_hash = Some(hash);
        self.updated_at = now;
    }

    pub fn mark_verified(&mut self, now: Timestamp) {
        self.verified = true;
        self.updated_at = now;
    }

    /// Consumes the current code: the hash is dropped so the same code can
    /// not log in twice, and the address counts as verified.
    pub fn redeem_code(&mut self, now: Timestamp) {
        self.password_hash = None;
        self.mark_verified(now);
    }

    /// View of this user as a session principal.
    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id.clone(), self.email.as_str(), self.verified)
    }
}
