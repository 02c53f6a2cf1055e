//! Email adapters implementing the `Mailer` port.
//!
//! - `ResendMailer` - production delivery through the Resend API
//! - `LoggingMailer` - development and tests; nothing leaves the process

mod logging;
mod resend;

pub use logging::LoggingMailer;
pub use resend::{ResendMailer, RESEND_API_BASE_URL};
