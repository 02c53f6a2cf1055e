//! Session token configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Shortest accepted HS256 signing key, in bytes.
const MIN_SECRET_LEN: usize = 32;

/// Session token configuration (HS256 JWT)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Signing key for session tokens
    pub token_secret: SecretString,

    /// Session lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    /// `iss` claim of issued tokens
    #[serde(default = "default_token_issuer")]
    pub token_issuer: String,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.token_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("auth.token_secret"));
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(ValidationError::TokenSecretTooShort);
        }
        if self.token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.token_issuer.is_empty() {
            return Err(ValidationError::MissingRequired("auth.token_issuer"));
        }
        Ok(())
    }
}

fn default_token_ttl() -> u64 {
    // 14 days
    1_209_600
}

fn default_token_issuer() -> String {
    "billing-gateway".to_string()
}
