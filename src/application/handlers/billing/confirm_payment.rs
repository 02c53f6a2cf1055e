//! ConfirmPaymentHandler - Command handler for provider callbacks.
//!
//! The callback is the only thing that confirms a payment, and its digest is
//! the only proof it came from the provider. The handler:
//!
//! 1. Parses the label into payment, product and tenant ids
//! 2. Loads the tenant named by the label and its callback secret
//! 3. Verifies the digest against that secret
//! 4. Moves the payment to `confirm`
//!
//! A rejected callback never reaches step 4. Every outcome is logged with a
//! distinct `outcome` field, since rejections are the fraud signal operators
//! watch for.

use std::sync::Arc;

use crate::domain::billing::{
    BillingError, CallbackNotification, CallbackVerifier, Label, Payment, PaymentStatus,
};
use crate::domain::foundation::PaymentId;
use crate::ports::{Clock, PaymentRepository, TenantReader};

use super::payment_transition::apply_payment_event;

/// Command carrying an unauthenticated provider callback.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentCommand {
    pub notification: CallbackNotification,
}

/// Result of an authenticated callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPaymentResult {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
    /// False when the payment was already confirmed.
    pub transitioned: bool,
}

/// Handler for provider callbacks.
pub struct ConfirmPaymentHandler {
    tenants: Arc<dyn TenantReader>,
    payments: Arc<dyn PaymentRepository>,
    clock: Arc<dyn Clock>,
}

impl ConfirmPaymentHandler {
    pub fn new(
        tenants: Arc<dyn TenantReader>,
        payments: Arc<dyn PaymentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tenants,
            payments,
            clock,
        }
    }

    pub async fn handle(&self, cmd: ConfirmPaymentCommand) -> Result<ConfirmPaymentResult, BillingError> {
        let notification = cmd.notification;
        let operation_id = notification.operation_id.as_str();

        let label = match Label::parse(&notification.label) {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(
                    outcome = "malformed_label",
                    operation_id,
                    label = %notification.label,
                    "Callback rejected"
                );
                return Err(e);
            }
        };

        let tenant = match self.tenants.find_by_id(&label.tenant_id).await {
            Ok(Some(tenant)) => tenant,
            Ok(None) => {
                tracing::warn!(
                    outcome = "tenant_not_found",
                    operation_id,
                    tenant_id = %label.tenant_id,
                    "Callback rejected"
                );
                return Err(BillingError::tenant_not_found(label.tenant_id.as_str()));
            }
            Err(e) => {
                tracing::error!(
                    outcome = "persistence_failure",
                    operation_id,
                    error = %e,
                    "Callback failed"
                );
                return Err(e.into());
            }
        };

        let verifier = CallbackVerifier::new(tenant.secret);
        if let Err(mismatch) = verifier.verify(&notification) {
            tracing::warn!(
                outcome = "digest_mismatch",
                operation_id,
                tenant_id = %tenant.id,
                payment_id = %label.payment_id,
                expected = %mismatch.expected,
                received = %mismatch.received,
                "Callback rejected"
            );
            return Err(BillingError::AuthenticationFailed);
        }

        let (payment, outcome) = match apply_payment_event(
            &*self.payments,
            &*self.clock,
            &label.payment_id,
            Payment::confirm,
        )
        .await
        {
            Ok(applied) => applied,
            Err(e @ BillingError::NotFound { .. }) => {
                tracing::warn!(
                    outcome = "payment_not_found",
                    operation_id,
                    payment_id = %label.payment_id,
                    "Callback rejected"
                );
                return Err(e);
            }
            Err(e) => {
                tracing::error!(
                    outcome = "persistence_failure",
                    operation_id,
                    payment_id = %label.payment_id,
                    error = %e,
                    "Callback failed"
                );
                return Err(e);
            }
        };

        if outcome.is_applied() {
            tracing::info!(
                outcome = "confirmed",
                operation_id,
                payment_id = %payment.id,
                amount = %notification.amount,
                "Payment confirmed"
            );
        } else {
            tracing::info!(
                outcome = "already_confirmed",
                operation_id,
                payment_id = %payment.id,
                "Payment already confirmed"
            );
        }

        Ok(ConfirmPaymentResult {
            payment_id: payment.id,
            status: payment.status,
            transitioned: outcome.is_applied(),
        })
    }
}
