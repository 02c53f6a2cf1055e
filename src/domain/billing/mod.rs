//! Billing domain module.
//!
//! Storefront products, the payment lifecycle, and the label and digest
//! scheme that ties a provider callback back to a payment.
//!
//! # Module Structure
//!
//! - `label` - payment/product/tenant correlation token
//! - `callback` / `callback_verifier` - provider notification and its SHA-1 check
//! - `payment` / `status` - payment aggregate and its state machine

mod callback;
mod callback_verifier;
mod errors;
mod label;
mod payment;
mod product;
mod status;
mod tenant;

pub use callback::{CallbackNotification, CANONICAL_SEPARATOR};
pub use callback_verifier::{CallbackVerifier, DigestMismatch};
pub use errors::BillingError;
pub use label::Label;
pub use payment::{Payment, TransitionOutcome};
pub use product::Product;
pub use status::PaymentStatus;
pub use tenant::Tenant;
