//! Mock ports shared by the account handler tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::account::{EmailAddress, User};
use crate::domain::foundation::{
    AuthError, AuthenticatedUser, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::ports::{EmailMessage, Mailer, SessionToken, TokenIssuer, UserRepository};

pub fn email() -> EmailAddress {
    EmailAddress::parse("buyer@example.com").unwrap()
}

pub fn existing_user() -> User {
    User::register(UserId::new("U1").unwrap(), email(), Timestamp::from_unix_secs(10))
}

pub struct MockUserRepository {
    users: Mutex<HashMap<EmailAddress, User>>,
    fail_save: bool,
    save_calls: Mutex<u32>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            fail_save: false,
            save_calls: Mutex::new(0),
        }
    }

    pub fn with(user: User) -> Self {
        let repo = Self::new();
        repo.users.lock().unwrap().insert(user.email.clone(), user);
        repo
    }

    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::new()
        }
    }

    pub fn stored(&self, email: &EmailAddress) -> Option<User> {
        self.users.lock().unwrap().get(email).cloned()
    }

    pub fn save_calls(&self) -> u32 {
        *self.save_calls.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        *self.save_calls.lock().unwrap() += 1;
        if self.fail_save {
            return Err(DomainError::new(ErrorCode::DatabaseError, "Simulated save failure"));
        }
        self.users
            .lock()
            .unwrap()
            .insert(user.email.clone(), user.clone());
        Ok(())
    }
}

/// Mailer whose provider always refuses.
pub struct RejectingMailer;

#[async_trait]
impl Mailer for RejectingMailer {
    async fn send(&self, _message: &EmailMessage) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::DeliveryFailed, "Simulated 503 from provider"))
    }
}

/// Token issuer that encodes the user id into a fake token.
pub struct MockTokenIssuer {
    fail: bool,
}

impl MockTokenIssuer {
    pub fn new() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl TokenIssuer for MockTokenIssuer {
    async fn issue(&self, user: &AuthenticatedUser) -> Result<SessionToken, AuthError> {
        if self.fail {
            return Err(AuthError::service_unavailable("Simulated signing failure"));
        }
        Ok(SessionToken {
            token: format!("token-for-{}", user.id),
            expires_at: Timestamp::from_unix_secs(999_999),
        })
    }
}
