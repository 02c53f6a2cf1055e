//! VerifyLoginCodeHandler - Command handler for redeeming a login code.

use std::sync::Arc;

use crate::domain::account::{verify_code, AccountError, EmailAddress};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{Clock, TokenIssuer, UserRepository};

/// Command to exchange an emailed code for a session token.
#[derive(Debug, Clone)]
pub struct VerifyLoginCodeCommand {
    pub email: String,
    pub code: String,
}

/// Issued session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyLoginCodeResult {
    pub user_id: UserId,
    pub token: String,
    pub expires_at: Timestamp,
}

/// Handler for login code redemption.
///
/// An unknown address, a user without a code, and a wrong code all fail the
/// same way, so callers cannot probe which addresses exist. A code logs in
/// once; redeeming it clears the stored hash.
pub struct VerifyLoginCodeHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
    clock: Arc<dyn Clock>,
}

impl VerifyLoginCodeHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            tokens,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: VerifyLoginCodeCommand,
    ) -> Result<VerifyLoginCodeResult, AccountError> {
        let email = EmailAddress::parse(&cmd.email).map_err(|_| AccountError::InvalidCredentials)?;

        let Some(mut user) = self.users.find_by_email(&email).await? else {
            tracing::info!("Login rejected: unknown address");
            return Err(AccountError::InvalidCredentials);
        };

        let matches = user
            .password_hash
            .as_deref()
            .is_some_and(|hash| verify_code(cmd.code.trim(), hash));
        if !matches {
            tracing::info!(user_id = %user.id, "Login rejected: code mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        user.redeem_code(self.clock.now());
        self.users.save(&user).await?;

        let session = self.tokens.issue(&user.to_authenticated()).await?;

        tracing::info!(user_id = %user.id, "Login succeeded");

        Ok(VerifyLoginCodeResult {
            user_id: user.id,
            token: session.token,
            expires_at: session.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::domain::account::{OneTimeCode, User};

    use super::super::test_support::{email, existing_user, MockTokenIssuer, MockUserRepository};

    fn user_with_code(code: &OneTimeCode) -> User {
        let mut user = existing_user();
        user.set_code_hash(code.hash().unwrap(), Timestamp::from_unix_secs(20));
        user
    }

    fn handler(users: Arc<MockUserRepository>, tokens: MockTokenIssuer) -> VerifyLoginCodeHandler {
        VerifyLoginCodeHandler::new(
            users,
            Arc::new(tokens),
            Arc::new(FixedClock::new(Timestamp::from_unix_secs(500))),
        )
    }

    fn command(email: &str, code: &str) -> VerifyLoginCodeCommand {
        VerifyLoginCodeCommand {
            email: email.to_string(),
            code: code.to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn correct_code_verifies_user_and_issues_token() {
        let code = OneTimeCode::generate(6);
        let users = Arc::new(MockUserRepository::with(user_with_code(&code)));

        let result = handler(users.clone(), MockTokenIssuer::new())
            .handle(command("Buyer@example.com", code.expose()))
            .await
            .unwrap();

        assert_eq!(result.token, "token-for-U1");
        assert_eq!(result.user_id.as_str(), "U1");

        let stored = users.stored(&email()).unwrap();
        assert!(stored.verified);
        assert!(stored.password_hash.is_none());
        assert_eq!(stored.updated_at, Timestamp::from_unix_secs(500));
    }

    #[tokio::test]
    async fn redeemed_code_cannot_log_in_again() {
        let code = OneTimeCode::generate(6);
        let mut user = user_with_code(&code);
        user.mark_verified(Timestamp::from_unix_secs(30));
        let users = Arc::new(MockUserRepository::with(user));
        let handler = handler(users.clone(), MockTokenIssuer::new());

        handler
            .handle(command("buyer@example.com", code.expose()))
            .await
            .unwrap();
        let replay = handler
            .handle(command("buyer@example.com", code.expose()))
            .await;

        assert_eq!(replay.unwrap_err(), AccountError::InvalidCredentials);
        assert_eq!(users.save_calls(), 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn wrong_code_is_invalid_credentials() {
        let code = OneTimeCode::generate(6);
        let users = Arc::new(MockUserRepository::with(user_with_code(&code)));

        let result = handler(users.clone(), MockTokenIssuer::new())
            .handle(command("buyer@example.com", "wrong!"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::InvalidCredentials);
        assert!(!users.stored(&email()).unwrap().verified);
    }

    #[tokio::test]
    async fn unknown_address_is_invalid_credentials() {
        let users = Arc::new(MockUserRepository::new());

        let result = handler(users, MockTokenIssuer::new())
            .handle(command("nobody@example.com", "abc123"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::InvalidCredentials);
    }

    #[tokio::test]
    async fn user_without_code_is_invalid_credentials() {
        let users = Arc::new(MockUserRepository::with(existing_user()));

        let result = handler(users, MockTokenIssuer::new())
            .handle(command("buyer@example.com", "abc123"))
            .await;

        assert_eq!(result.unwrap_err(), AccountError::InvalidCredentials);
    }

    #[tokio::test]
    async fn signing_failure_is_token_issue() {
        let code = OneTimeCode::generate(6);
        let users = Arc::new(MockUserRepository::with(user_with_code(&code)));

        let result = handler(users, MockTokenIssuer::failing())
            .handle(command("buyer@example.com", code.expose()))
            .await;

        assert!(matches!(result, Err(AccountError::TokenIssue(_))));
    }
}
