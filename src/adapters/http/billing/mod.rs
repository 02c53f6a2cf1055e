//! HTTP adapter for storefront and payment endpoints.
//!
//! - `GET /v1/:app/products` - List a tenant's products
//! - `GET /v1/:app/:product/payments/purchase` - Start a payment
//! - `GET /v1/:app/:product/payments/success` - Provider success redirect
//! - `POST /v1/payments/confirm` - Provider callback

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{BillingApiError, BillingAppState};
pub use routes::billing_routes;
