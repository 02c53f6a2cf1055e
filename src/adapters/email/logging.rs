//! Development mailer that only logs.
//!
//! Message bodies carry one-time codes, so only the recipient and subject
//! reach the log. Tests read the full messages back through `sent()`.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::DomainError;
use crate::ports::{EmailMessage, Mailer};

/// Mailer that records messages instead of delivering them.
#[derive(Debug, Default)]
pub struct LoggingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl LoggingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages "sent" so far, oldest first.
    pub fn sent(&self) -> Vec<EmailMessage> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), DomainError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Email delivery skipped (logging mailer)"
        );
        match self.sent.lock() {
            Ok(mut sent) => sent.push(message.clone()),
            Err(poisoned) => poisoned.into_inner().push(message.clone()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_messages_in_order() {
        let mailer = LoggingMailer::new();

        mailer
            .send(&EmailMessage::new("a@example.com", "first", "1"))
            .await
            .unwrap();
        mailer
            .send(&EmailMessage::new("b@example.com", "second", "2"))
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@example.com");
        assert_eq!(sent[1].text, "2");
    }
}
