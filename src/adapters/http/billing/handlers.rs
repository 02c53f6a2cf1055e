//! HTTP handlers for storefront and payment endpoints.
//!
//! These handlers connect Axum routes to the billing command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::form::FormOrJson;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::billing::{
    CompletePaymentRedirectCommand, CompletePaymentRedirectHandler, ConfirmPaymentCommand,
    ConfirmPaymentHandler, ListProductsHandler, ListProductsQuery, PurchaseProductCommand,
    PurchaseProductHandler,
};
use crate::domain::billing::{BillingError, CallbackNotification};
use crate::domain::foundation::{PaymentId, ProductId, TenantId};
use crate::ports::{Clock, PaymentRepository, ProductReader, TenantReader};

use super::dto::{
    CallbackRequest, ListProductsResponse, PaymentStatusResponse, ProductResponse,
    PurchaseResponse, SuccessRedirectParams,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies of the billing endpoints.
#[derive(Clone)]
pub struct BillingAppState {
    pub tenants: Arc<dyn TenantReader>,
    pub products: Arc<dyn ProductReader>,
    pub payments: Arc<dyn PaymentRepository>,
    pub clock: Arc<dyn Clock>,
    /// Public base URL of this service, for provider redirects.
    pub public_url: Arc<str>,
}

impl BillingAppState {
    pub fn list_products_handler(&self) -> ListProductsHandler {
        ListProductsHandler::new(self.tenants.clone(), self.products.clone())
    }

    pub fn purchase_handler(&self) -> PurchaseProductHandler {
        PurchaseProductHandler::new(
            self.tenants.clone(),
            self.products.clone(),
            self.payments.clone(),
            self.clock.clone(),
            self.public_url.as_ref(),
        )
    }

    pub fn redirect_handler(&self) -> CompletePaymentRedirectHandler {
        CompletePaymentRedirectHandler::new(self.payments.clone(), self.clock.clone())
    }

    pub fn confirm_handler(&self) -> ConfirmPaymentHandler {
        ConfirmPaymentHandler::new(
            self.tenants.clone(),
            self.payments.clone(),
            self.clock.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /v1/:app/products - Enabled products of a tenant
pub async fn list_products(
    State(state): State<BillingAppState>,
    Path(app): Path<String>,
) -> Result<impl IntoResponse, BillingApiError> {
    let query = ListProductsQuery {
        tenant_id: TenantId::new(app)?,
    };

    let products = state.list_products_handler().handle(query).await?;

    let response = ListProductsResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    };
    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /v1/:app/:product/payments/purchase - Start a payment
pub async fn purchase(
    State(state): State<BillingAppState>,
    RequireAuth(user): RequireAuth,
    Path((app, product)): Path<(String, String)>,
) -> Result<impl IntoResponse, BillingApiError> {
    let cmd = PurchaseProductCommand {
        tenant_id: TenantId::new(app)?,
        product_id: ProductId::new(product)?,
        user,
    };

    let result = state.purchase_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(PurchaseResponse::from(result))))
}

/// GET /v1/:app/:product/payments/success?payment=<id> - Provider success redirect
pub async fn payment_success(
    State(state): State<BillingAppState>,
    Query(params): Query<SuccessRedirectParams>,
) -> Result<impl IntoResponse, BillingApiError> {
    let cmd = CompletePaymentRedirectCommand {
        payment_id: PaymentId::new(params.payment)?,
    };

    let result = state.redirect_handler().handle(cmd).await?;

    Ok(Json(PaymentStatusResponse::from(result)))
}

/// POST /v1/payments/confirm - Provider callback
pub async fn confirm_payment(
    State(state): State<BillingAppState>,
    FormOrJson(request): FormOrJson<CallbackRequest>,
) -> Result<impl IntoResponse, BillingApiError> {
    let cmd = ConfirmPaymentCommand {
        notification: CallbackNotification::try_from(request)?,
    };

    let result = state.confirm_handler().handle(cmd).await?;

    Ok(Json(PaymentStatusResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts billing errors to HTTP responses.
///
/// Callback rejections never map to 2xx, so the provider retries them.
#[derive(Debug)]
pub struct BillingApiError(BillingError);

impl From<BillingError> for BillingApiError {
    fn from(err: BillingError) -> Self {
        Self(err)
    }
}

impl From<crate::domain::foundation::ValidationError> for BillingApiError {
    fn from(err: crate::domain::foundation::ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            BillingError::NotFound { .. } => StatusCode::NOT_FOUND,
            BillingError::MalformedLabel(_) | BillingError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            BillingError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            BillingError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self.0 {
            BillingError::PersistenceFailure(_) => "Internal error, please retry".to_string(),
            other => other.to_string(),
        };
        let body = ErrorResponse::new(self.0.code().to_string(), message);
        (status, Json(body)).into_response()
    }
}
