//! One-time login codes.
//!
//! A code is minted, hashed with Argon2 into the user's credential, and mailed
//! in plain text. Only the hash is stored.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::Rng;
use std::fmt;

use super::AccountError;

/// Characters a code is drawn from.
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default code length.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Plaintext one-time code. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl OneTimeCode {
    /// Draws a random code of `length` characters from [`CODE_ALPHABET`].
    pub fn generate(length: usize) -> Self {
        let mut rng = rand::thread_rng();
        let code = (0..length)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    /// Returns the plaintext for mailing.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Hashes the code into a PHC string suitable for storage.
    pub fn hash(&self) -> Result<String, AccountError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(self.0.as_bytes(), &salt)
            .map_err(|e| AccountError::Credential(e.to_string()))?;
        Ok(hash.to_string())
    }
}

impl fmt::Debug for OneTimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OneTimeCode([REDACTED])")
    }
}

/// Checks a submitted code against a stored hash.
///
/// An unparseable hash counts as a mismatch.
pub fn verify_code(submitted: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(submitted.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
