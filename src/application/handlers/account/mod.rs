//! Account handlers.
//!
//! One-time-code login: request a code by email, then redeem it for a
//! session token. The first request for an address registers it.

mod request_login_code;
mod verify_login_code;

#[cfg(test)]
mod test_support;

pub use request_login_code::{
    LoginCodeSettings, RequestLoginCodeCommand, RequestLoginCodeHandler, RequestLoginCodeResult,
    DEFAULT_LOGIN_SUBJECT,
};
pub use verify_login_code::{VerifyLoginCodeCommand, VerifyLoginCodeHandler, VerifyLoginCodeResult};
