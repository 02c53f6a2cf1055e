//! Outbound email port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// A single plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
        }
    }
}

/// Sends email. Delivery is attempted once.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// # Errors
    ///
    /// - `DeliveryFailed` if the message was not accepted
    async fn send(&self, message: &EmailMessage) -> Result<(), DomainError>;
}
