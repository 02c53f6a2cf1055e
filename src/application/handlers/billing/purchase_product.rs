//! PurchaseProductHandler - Command handler for starting a payment.
//!
//! Looks up the tenant and the product, records a new `created` payment that
//! snapshots the product, and returns what the caller needs to render the
//! provider's purchase form. Every call creates a new payment.

use std::sync::Arc;

use crate::domain::billing::{BillingError, Label, Payment};
use crate::domain::foundation::{AuthenticatedUser, PaymentId, ProductId, TenantId};
use crate::ports::{Clock, PaymentRepository, ProductReader, TenantReader};

/// Command to purchase a product as the authenticated user.
#[derive(Debug, Clone)]
pub struct PurchaseProductCommand {
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub user: AuthenticatedUser,
}

/// Data for the provider purchase form.
#[derive(Debug, Clone)]
pub struct PurchaseProductResult {
    pub payment: Payment,
    pub label: Label,
    /// Tenant payout wallet the provider credits.
    pub wallet: String,
    /// Where the provider sends the buyer after a successful payment.
    pub success_url: String,
}

/// Handler for purchases.
pub struct PurchaseProductHandler {
    tenants: Arc<dyn TenantReader>,
    products: Arc<dyn ProductReader>,
    payments: Arc<dyn PaymentRepository>,
    clock: Arc<dyn Clock>,
    public_url: String,
}

impl PurchaseProductHandler {
    pub fn new(
        tenants: Arc<dyn TenantReader>,
        products: Arc<dyn ProductReader>,
        payments: Arc<dyn PaymentRepository>,
        clock: Arc<dyn Clock>,
        public_url: impl Into<String>,
    ) -> Self {
        Self {
            tenants,
            products,
            payments,
            clock,
            public_url: public_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: PurchaseProductCommand,
    ) -> Result<PurchaseProductResult, BillingError> {
        let tenant = self
            .tenants
            .find_by_id(&cmd.tenant_id)
            .await?
            .ok_or_else(|| BillingError::tenant_not_found(cmd.tenant_id.as_str()))?;

        // Disabled products are off sale even when addressed directly.
        let product = self
            .products
            .find_for_tenant(&tenant.id, &cmd.product_id)
            .await?
            .filter(|product| product.enabled)
            .ok_or_else(|| BillingError::product_not_found(cmd.product_id.as_str()))?;

        let payment = Payment::create(PaymentId::generate(), &product, cmd.user.id, self.clock.now());

        if let Err(e) = self.payments.create(&payment).await {
            tracing::error!(
                tenant_id = %tenant.id,
                product_id = %product.id,
                error = %e,
                "Failed to record payment"
            );
            return Err(e.into());
        }

        let label = payment.label();
        let success_url = self.success_url(&payment);

        tracing::info!(
            payment_id = %payment.id,
            tenant_id = %tenant.id,
            product_id = %product.id,
            amount = %payment.amount,
            "Payment created"
        );

        Ok(PurchaseProductResult {
            payment,
            label,
            wallet: tenant.wallet,
            success_url,
        })
    }

    fn success_url(&self, payment: &Payment) -> String {
        format!(
            "{}/v1/{}/{}/payments/success?payment={}",
            self.public_url.trim_end_matches('/'),
            payment.tenant_id,
            payment.product_id,
            payment.id
        )
    }
}
