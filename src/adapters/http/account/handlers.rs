//! HTTP handlers for the one-time-code login endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::form::FormOrJson;
use crate::application::handlers::account::{
    LoginCodeSettings, RequestLoginCodeCommand, RequestLoginCodeHandler, VerifyLoginCodeCommand,
    VerifyLoginCodeHandler,
};
use crate::domain::account::AccountError;
use crate::ports::{Clock, Mailer, TokenIssuer, UserRepository};

use super::dto::{CheckCodeRequest, SendCodeRequest, SendCodeResponse, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies of the login endpoints.
#[derive(Clone)]
pub struct AccountAppState {
    pub users: Arc<dyn UserRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub clock: Arc<dyn Clock>,
    pub login: LoginCodeSettings,
}

impl AccountAppState {
    pub fn request_code_handler(&self) -> RequestLoginCodeHandler {
        RequestLoginCodeHandler::new(
            self.users.clone(),
            self.mailer.clone(),
            self.clock.clone(),
            self.login.clone(),
        )
    }

    pub fn verify_code_handler(&self) -> VerifyLoginCodeHandler {
        VerifyLoginCodeHandler::new(self.users.clone(), self.tokens.clone(), self.clock.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /v1/user/send - Mail a login code
pub async fn send_code(
    State(state): State<AccountAppState>,
    FormOrJson(request): FormOrJson<SendCodeRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let cmd = RequestLoginCodeCommand {
        email: request.email,
    };

    let result = state.request_code_handler().handle(cmd).await?;

    Ok(Json(SendCodeResponse {
        email: result.email.to_string(),
        sent: true,
    }))
}

/// POST /v1/user/:email/check - Redeem a login code for a session token
pub async fn check_code(
    State(state): State<AccountAppState>,
    Path(email): Path<String>,
    FormOrJson(request): FormOrJson<CheckCodeRequest>,
) -> Result<impl IntoResponse, AccountApiError> {
    let cmd = VerifyLoginCodeCommand {
        email,
        code: request.password,
    };

    let result = state.verify_code_handler().handle(cmd).await?;

    Ok(Json(SessionResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts account errors to HTTP responses.
#[derive(Debug)]
pub struct AccountApiError(AccountError);

impl From<AccountError> for AccountApiError {
    fn from(err: AccountError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            AccountError::InvalidCredentials | AccountError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            AccountError::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            AccountError::TokenIssue(_)
            | AccountError::Credential(_)
            | AccountError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self.0 {
            AccountError::InvalidCredentials | AccountError::Validation { .. } => {
                self.0.to_string()
            }
            AccountError::DeliveryFailed(_) => "Could not deliver login code".to_string(),
            _ => "Internal error, please retry".to_string(),
        };
        let body = ErrorResponse::new(self.0.code().to_string(), message);
        (status, Json(body)).into_response()
    }
}
