//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `billing` - Products, payments, labels and callback authentication
//! - `account` - Users and one-time login codes

pub mod account;
pub mod billing;
pub mod foundation;
