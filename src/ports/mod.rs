//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `RecordStore` - Generic collection/record store
//! - `TenantReader`, `ProductReader` - Read-only catalogue lookups
//! - `PaymentRepository`, `UserRepository` - Typed persistence
//!
//! ## Collaborator Ports
//!
//! - `Mailer` - Outbound email
//! - `TokenIssuer`, `SessionValidator` - Session tokens
//! - `Clock` - Current time

mod clock;
mod mailer;
mod payment_repository;
mod product_reader;
mod record_store;
mod session_validator;
mod tenant_reader;
mod token_issuer;
mod user_repository;

pub use clock::Clock;
pub use mailer::{EmailMessage, Mailer};
pub use payment_repository::PaymentRepository;
pub use product_reader::ProductReader;
pub use record_store::{Filter, Record, RecordStore, Sort, SortOrder};
pub use session_validator::SessionValidator;
pub use tenant_reader::TenantReader;
pub use token_issuer::{SessionToken, TokenIssuer};
pub use user_repository::UserRepository;
