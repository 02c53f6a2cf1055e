//! Axum router configuration for storefront and payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{confirm_payment, list_products, payment_success, purchase, BillingAppState};

/// Create the billing API router, mounted under `/v1`.
///
/// # Routes
///
/// ## Storefront
/// - `GET /:app/products` - Enabled products of a tenant
///
/// ## Payments
/// - `GET /:app/:product/payments/purchase` - Start a payment (Bearer token required)
/// - `GET /:app/:product/payments/success` - Provider success redirect
///
/// ## Provider Callback (no session, digest verified)
/// - `POST /payments/confirm`
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/:app/products", get(list_products))
        .route("/:app/:product/payments/purchase", get(purchase))
        .route("/:app/:product/payments/success", get(payment_success))
        .route("/payments/confirm", post(confirm_payment))
}
