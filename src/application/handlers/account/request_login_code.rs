//! RequestLoginCodeHandler - Command handler for mailing a one-time login code.
//!
//! Unknown addresses get a user record on the spot, so the first login is
//! also the registration. Each request replaces the previous code.

use std::sync::Arc;

use crate::domain::account::{AccountError, EmailAddress, OneTimeCode, User, DEFAULT_CODE_LENGTH};
use crate::domain::foundation::UserId;
use crate::ports::{Clock, EmailMessage, Mailer, UserRepository};

/// Default subject line of login code emails.
pub const DEFAULT_LOGIN_SUBJECT: &str = "Billing password";

/// How login codes are minted and mailed.
#[derive(Debug, Clone)]
pub struct LoginCodeSettings {
    pub code_length: usize,
    pub subject: String,
}

impl Default for LoginCodeSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            subject: DEFAULT_LOGIN_SUBJECT.to_string(),
        }
    }
}

/// Command to send a login code to an address.
#[derive(Debug, Clone)]
pub struct RequestLoginCodeCommand {
    /// Address as typed by the user.
    pub email: String,
}

/// Result of a mailed login code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLoginCodeResult {
    pub email: EmailAddress,
    /// True if this request registered the address.
    pub registered: bool,
}

/// Handler for login code requests.
pub struct RequestLoginCodeHandler {
    users: Arc<dyn UserRepository>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    settings: LoginCodeSettings,
}

impl RequestLoginCodeHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        settings: LoginCodeSettings,
    ) -> Self {
        Self {
            users,
            mailer,
            clock,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: RequestLoginCodeCommand,
    ) -> Result<RequestLoginCodeResult, AccountError> {
        let email = EmailAddress::parse(&cmd.email)?;
        let now = self.clock.now();

        let (mut user, registered) = match self.users.find_by_email(&email).await? {
            Some(user) => (user, false),
            None => (User::register(UserId::generate(), email.clone(), now), true),
        };

        let code = OneTimeCode::generate(self.settings.code_length);
        user.set_code_hash(code.hash()?, now);

        // Stored before mailing so a delivered code is always redeemable.
        self.users.save(&user).await?;

        let message = EmailMessage::new(
            email.as_str(),
            self.settings.subject.as_str(),
            format!("Password: {}", code.expose()),
        );
        if let Err(e) = self.mailer.send(&message).await {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to mail login code");
            return Err(e.into());
        }

        tracing::info!(user_id = %user.id, registered, "Login code sent");

        Ok(RequestLoginCodeResult { email, registered })
    }
}
