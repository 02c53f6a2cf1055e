//! Body extractor accepting either a urlencoded form or JSON.
//!
//! The payment provider posts callbacks as forms while API clients send JSON,
//! and several endpoints must take both. The `Content-Type` header decides.

use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use super::error::ErrorResponse;

/// Request body decoded from a form or from JSON.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

/// Body that could not be decoded.
#[derive(Debug)]
pub struct BodyRejection(String);

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new("VALIDATION_FAILED", self.0);
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| BodyRejection(e.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| BodyRejection(e.body_text()))?;
            Ok(Self(value))
        }
    }
}
