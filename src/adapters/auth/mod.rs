//! Authentication adapters.
//!
//! - `jwt` - HS256 implementation of the `TokenIssuer` and `SessionValidator` ports

mod jwt;

pub use jwt::JwtTokenService;
