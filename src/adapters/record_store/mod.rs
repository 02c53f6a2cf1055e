//! Record store adapters.
//!
//! - `InMemoryRecordStore` - development and tests
//! - `PostgresRecordStore` - JSONB-backed production store
//! - `RecordStoreRepository` - typed ports over either backend

mod memory;
mod postgres;
mod repository;

pub use memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;
pub use repository::{RecordStoreRepository, APPLICATIONS, PAYMENTS, PRODUCTS, USERS};
