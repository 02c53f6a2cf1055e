//! Account domain module.
//!
//! Users and the one-time codes they log in with.

mod email;
mod errors;
mod one_time_code;
mod user;

pub use email::EmailAddress;
pub use errors::AccountError;
pub use one_time_code::{verify_code, OneTimeCode, CODE_ALPHABET, DEFAULT_CODE_LENGTH};
pub use user::User;
