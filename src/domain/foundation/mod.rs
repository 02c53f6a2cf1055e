//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the billing domain.

mod amount;
mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use amount::Amount;
pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PaymentId, ProductId, TenantId, UserId, LABEL_DELIMITER};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
