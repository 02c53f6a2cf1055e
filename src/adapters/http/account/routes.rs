//! Axum router configuration for the login endpoints.

use axum::{routing::post, Router};

use super::handlers::{check_code, send_code, AccountAppState};

/// Create the login router, mounted under `/v1`.
///
/// # Routes
/// - `POST /user/send` - Mail a login code (`email`, form or JSON)
/// - `POST /user/:email/check` - Redeem it (`password`, form or JSON)
pub fn account_routes() -> Router<AccountAppState> {
    Router::new()
        .route("/user/send", post(send_code))
        .route("/user/:email/check", post(check_code))
}
