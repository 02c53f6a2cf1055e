//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure;
//! `app_router` assembles them with the cross-cutting layers.

pub mod account;
pub mod billing;
pub mod error;
pub mod form;
pub mod middleware;

use std::time::Duration;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use account::{account_routes, AccountAppState};
pub use billing::{billing_routes, BillingAppState};
pub use error::ErrorResponse;
pub use form::FormOrJson;
pub use middleware::{auth_middleware, AuthState, RequireAuth};

/// Everything the router needs.
#[derive(Clone)]
pub struct AppState {
    pub billing: BillingAppState,
    pub account: AccountAppState,
    pub auth: AuthState,
    pub request_timeout: Duration,
}

/// Builds the complete service router.
///
/// # Routes
/// - `/v1/...` - billing and login endpoints
/// - `GET /health` - liveness
pub fn app_router(state: AppState) -> Router {
    let v1 = Router::new()
        .merge(billing_routes().with_state(state.billing))
        .merge(account_routes().with_state(state.account));

    Router::new()
        .nest("/v1", v1)
        .route("/health", get(health))
        .layer(from_fn_with_state(state.auth, auth_middleware))
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// GET /health - Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
