//! Account error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidCredentials | 400 |
//! | Validation | 400 |
//! | DeliveryFailed | 502 |
//! | TokenIssue | 500 |
//! | Credential | 500 |
//! | PersistenceFailure | 500 |

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};
use thiserror::Error;

/// Errors raised by the one-time-code login flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Unknown email, no code issued, or the code does not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Could not deliver login code: {0}")]
    DeliveryFailed(String),

    #[error("Could not issue session token: {0}")]
    TokenIssue(String),

    /// Hashing the code failed.
    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
}

impl AccountError {
    /// Returns the error code used in API responses.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AccountError::DeliveryFailed(_) => ErrorCode::DeliveryFailed,
            AccountError::TokenIssue(_) | AccountError::Credential(_) => ErrorCode::InternalError,
            AccountError::PersistenceFailure(_) => ErrorCode::DatabaseError,
            AccountError::Validation { .. } => ErrorCode::ValidationFailed,
        }
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DeliveryFailed => AccountError::DeliveryFailed(err.message),
            _ => AccountError::PersistenceFailure(err.message),
        }
    }
}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        AccountError::Validation {
            field,
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for AccountError {
    fn from(err: AuthError) -> Self {
        AccountError::TokenIssue(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_per_variant() {
        assert_eq!(AccountError::InvalidCredentials.code(), ErrorCode::InvalidCredentials);
        assert_eq!(
            AccountError::TokenIssue("bad key".into()).code(),
            ErrorCode::InternalError
        );
    }

    #[test]
    fn mailer_delivery_error_stays_delivery_failure() {
        let err: AccountError = DomainError::new(ErrorCode::DeliveryFailed, "503 from API").into();
        assert_eq!(err, AccountError::DeliveryFailed("503 from API".into()));
    }

    #[test]
    fn store_error_becomes_persistence_failure() {
        let err: AccountError = DomainError::database("disk full").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
