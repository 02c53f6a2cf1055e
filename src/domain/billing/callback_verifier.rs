//! Provider callback digest verification.
//!
//! The provider signs each notification with SHA-1 over the canonical
//! message, which embeds the tenant secret. SHA-1 is what the provider
//! speaks; nothing else in this crate should copy the scheme.

use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;

use super::CallbackNotification;

/// Digest mismatch details, kept for operator logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestMismatch {
    pub expected: String,
    pub received: String,
}

/// Verifier bound to one tenant's callback secret.
pub struct CallbackVerifier {
    secret: SecretString,
}

impl CallbackVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Lowercase hex SHA-1 of the canonical message.
    pub fn expected_digest(&self, notification: &CallbackNotification) -> String {
        let message = notification.canonical_message(self.secret.expose_secret());
        hex::encode(Sha1::digest(message.as_bytes()))
    }

    /// Checks the provider digest byte for byte in constant time.
    ///
    /// # Errors
    ///
    /// Returns the expected and received digests when they differ.
    pub fn verify(&self, notification: &CallbackNotification) -> Result<(), DigestMismatch> {
        let expected = self.expected_digest(notification);
        let received = notification.sha1_hash.as_bytes();

        if expected.as_bytes().ct_eq(received).into() {
            Ok(())
        } else {
            Err(DigestMismatch {
                expected,
                received: notification.sha1_hash.clone(),
            })
        }
    }
}
