//! HTTP adapter for one-time-code login.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AccountApiError, AccountAppState};
pub use routes::account_routes;
