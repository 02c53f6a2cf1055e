//! User repository port.

use async_trait::async_trait;

use crate::domain::account::{EmailAddress, User};
use crate::domain::foundation::DomainError;

/// Persistence for users, keyed by email.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email. Returns `None` if no user registered it.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DomainError>;

    /// Inserts or updates a user.
    async fn save(&self, user: &User) -> Result<(), DomainError>;
}
