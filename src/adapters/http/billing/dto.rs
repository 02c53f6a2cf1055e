//! HTTP DTOs for storefront and payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::{
    CompletePaymentRedirectResult, ConfirmPaymentResult, PurchaseProductResult,
};
use crate::domain::billing::{BillingError, CallbackNotification, PaymentStatus, Product};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string of the provider success redirect.
#[derive(Debug, Clone, Deserialize)]
pub struct SuccessRedirectParams {
    pub payment: String,
}

/// Provider callback as posted on the wire.
///
/// `bill_id`, `operation_label` and `test_notification` are accepted and
/// ignored; they are not part of the digest.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackRequest {
    pub notification_type: String,
    pub operation_id: String,
    pub amount: f64,
    pub currency: u32,
    pub datetime: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub codepro: bool,
    #[serde(default)]
    pub label: String,
    pub sha1_hash: String,
    #[serde(default)]
    pub bill_id: Option<String>,
    #[serde(default)]
    pub operation_label: Option<String>,
    #[serde(default)]
    pub test_notification: Option<bool>,
}

impl TryFrom<CallbackRequest> for CallbackNotification {
    type Error = BillingError;

    fn try_from(req: CallbackRequest) -> Result<Self, Self::Error> {
        if !req.amount.is_finite() || req.amount < 0.0 {
            return Err(BillingError::validation(
                "amount",
                "must be a finite, non-negative number",
            ));
        }

        Ok(CallbackNotification {
            notification_type: req.notification_type,
            operation_id: req.operation_id,
            amount: req.amount,
            currency: req.currency,
            datetime: req.datetime,
            sender: req.sender,
            codepro: req.codepro,
            label: req.label,
            sha1_hash: req.sha1_hash,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Storefront entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price.as_decimal(),
        }
    }
}

/// Response for the product list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProductsResponse {
    pub products: Vec<ProductResponse>,
}

/// Everything the client needs to render the provider purchase form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseResponse {
    pub payment_id: String,
    pub product_id: String,
    pub title: String,
    pub description: String,
    /// Two-decimal amount, as the provider form expects it.
    pub amount: String,
    pub wallet: String,
    pub label: String,
    pub status: PaymentStatus,
    pub success_url: String,
}

impl From<PurchaseProductResult> for PurchaseResponse {
    fn from(result: PurchaseProductResult) -> Self {
        Self {
            payment_id: result.payment.id.to_string(),
            product_id: result.payment.product_id.to_string(),
            title: result.payment.name,
            description: result.payment.description,
            amount: result.payment.amount.to_string(),
            wallet: result.wallet,
            label: result.label.to_string(),
            status: result.payment.status,
            success_url: result.success_url,
        }
    }
}

/// Payment status after a redirect or callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub payment_id: String,
    pub status: PaymentStatus,
    pub transitioned: bool,
}

impl From<CompletePaymentRedirectResult> for PaymentStatusResponse {
    fn from(result: CompletePaymentRedirectResult) -> Self {
        Self {
            payment_id: result.payment_id.to_string(),
            status: result.status,
            transitioned: result.transitioned,
        }
    }
}

impl From<ConfirmPaymentResult> for PaymentStatusResponse {
    fn from(result: ConfirmPaymentResult) -> Self {
        Self {
            payment_id: result.payment_id.to_string(),
            status: result.status,
            transitioned: result.transitioned,
        }
    }
}
