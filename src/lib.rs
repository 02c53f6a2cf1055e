//! Billing Gateway - Multi-tenant storefront and payment confirmation service
//!
//! This crate sells tenant products through a wallet payment provider,
//! authenticates the provider's payment callbacks and signs buyers in with
//! emailed one-time codes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
