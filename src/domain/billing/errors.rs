//! Billing error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | MalformedLabel | 400 |
//! | AuthenticationFailed | 401 |
//! | Validation | 400 |
//! | PersistenceFailure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use thiserror::Error;

/// Errors raised by the storefront, purchase and callback flows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Tenant, product or payment is absent.
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Callback label has fewer than three components.
    #[error("Malformed label: '{0}'")]
    MalformedLabel(String),

    /// Callback digest does not match the one computed with the tenant secret.
    #[error("Callback authentication failed")]
    AuthenticationFailed,

    /// The record store failed to read or write.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// Request input was rejected.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
}

impl BillingError {
    pub fn tenant_not_found(id: impl Into<String>) -> Self {
        BillingError::NotFound {
            entity: "tenant",
            id: id.into(),
        }
    }

    pub fn product_not_found(id: impl Into<String>) -> Self {
        BillingError::NotFound {
            entity: "product",
            id: id.into(),
        }
    }

    pub fn payment_not_found(id: impl Into<String>) -> Self {
        BillingError::NotFound {
            entity: "payment",
            id: id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the error code used in API responses.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::NotFound { entity, .. } => match *entity {
                "tenant" => ErrorCode::TenantNotFound,
                "product" => ErrorCode::ProductNotFound,
                "payment" => ErrorCode::PaymentNotFound,
                _ => ErrorCode::NotFound,
            },
            BillingError::MalformedLabel(_) => ErrorCode::MalformedLabel,
            BillingError::AuthenticationFailed => ErrorCode::AuthenticationFailed,
            BillingError::PersistenceFailure(_) => ErrorCode::DatabaseError,
            BillingError::Validation { .. } => ErrorCode::ValidationFailed,
        }
    }

    /// Only store failures are worth retrying; every transition is idempotent.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BillingError::PersistenceFailure(_))
    }
}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => BillingError::Validation {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => BillingError::PersistenceFailure(err.message),
        }
    }
}

impl From<ValidationError> for BillingError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        BillingError::Validation {
            field,
            message: err.to_string(),
        }
    }
}
