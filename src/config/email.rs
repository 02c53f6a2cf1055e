//! Email configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Email configuration (Resend)
///
/// Without an API key, login codes are only logged. Production requires one.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    #[serde(default)]
    pub resend_api_key: Option<SecretString>,

    #[serde(default = "default_from_email")]
    pub from_email: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Subject line of login code emails
    #[serde(default = "default_login_subject")]
    pub login_subject: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match &self.resend_api_key {
            Some(key) if !key.expose_secret().starts_with("re_") => {
                return Err(ValidationError::InvalidResendKey);
            }
            None if *environment == Environment::Production => {
                return Err(ValidationError::MissingRequired("email.resend_api_key"));
            }
            _ => {}
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
            login_subject: default_login_subject(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@billing.localhost".to_string()
}

fn default_from_name() -> String {
    "Billing".to_string()
}

fn default_login_subject() -> String {
    "Billing password".to_string()
}
