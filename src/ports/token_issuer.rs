//! Session token issuing port.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp};

/// Bearer token handed to a user after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Mints session tokens that a `SessionValidator` later accepts.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, user: &AuthenticatedUser) -> Result<SessionToken, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_issuer_is_object_safe() {
        fn _accepts_dyn(_issuer: &dyn TokenIssuer) {}
    }
}
