//! Resend email adapter.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{EmailMessage, Mailer};

/// Default Resend API base URL.
pub const RESEND_API_BASE_URL: &str = "https://api.resend.com";

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

/// Sends mail through the Resend HTTP API.
pub struct ResendMailer {
    api_key: SecretString,
    from: String,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl ResendMailer {
    /// `from` is a full header value, e.g. `Billing <billing@example.com>`.
    pub fn new(api_key: SecretString, from: impl Into<String>) -> Self {
        Self {
            api_key,
            from: from.into(),
            api_base_url: RESEND_API_BASE_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Points the adapter at another base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    fn request<'a>(&'a self, message: &'a EmailMessage) -> SendEmailRequest<'a> {
        SendEmailRequest {
            from: &self.from,
            to: [&message.to],
            subject: &message.subject,
            text: &message.text,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), DomainError> {
        let url = format!("{}/emails", self.api_base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.request(message))
            .send()
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::DeliveryFailed, format!("Resend request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, error = %error_text, "Resend rejected email");
            return Err(DomainError::new(
                ErrorCode::DeliveryFailed,
                format!("Resend API error ({}): {}", status, error_text),
            ));
        }

        tracing::debug!(subject = %message.subject, "Email accepted by Resend");
        Ok(())
    }
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("from", &self.from)
            .field("api_base_url", &self.api_base_url)
            .finish_non_exhaustive()
    }
}
