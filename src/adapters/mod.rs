//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `record_store` - In-memory and PostgreSQL record stores, typed repositories
//! - `email` - Resend and logging mailers
//! - `auth` - JWT session tokens
//! - `clock` - System and fixed clocks
//! - `http` - Axum REST API

pub mod auth;
pub mod clock;
pub mod email;
pub mod http;
pub mod record_store;
