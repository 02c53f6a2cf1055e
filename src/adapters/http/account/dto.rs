//! HTTP DTOs for the one-time-code login endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::account::VerifyLoginCodeResult;

/// Request for a login code.
#[derive(Debug, Clone, Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
}

/// Submitted login code.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckCodeRequest {
    pub password: String,
}

/// Acknowledgement that a code went out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub email: String,
    pub sent: bool,
}

/// Session issued for a redeemed code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub token_type: String,
    /// Expiry as RFC 3339.
    pub expires_at: String,
}

impl From<VerifyLoginCodeResult> for SessionResponse {
    fn from(result: VerifyLoginCodeResult) -> Self {
        Self {
            token: result.token,
            token_type: "Bearer".to_string(),
            expires_at: result.expires_at.to_rfc3339(),
        }
    }
}
