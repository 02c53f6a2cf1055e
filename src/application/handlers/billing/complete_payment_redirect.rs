//! CompletePaymentRedirectHandler - Command handler for the provider success redirect.
//!
//! The buyer's browser returns from the provider with the payment id. That
//! moves a `created` payment to `paid`; replays and late redirects after the
//! callback leave the payment as it is.

use std::sync::Arc;

use crate::domain::billing::{BillingError, Payment, PaymentStatus};
use crate::domain::foundation::PaymentId;
use crate::ports::{Clock, PaymentRepository};

use super::payment_transition::apply_payment_event;

/// Command issued when the buyer lands on the success page.
#[derive(Debug, Clone)]
pub struct CompletePaymentRedirectCommand {
    pub payment_id: PaymentId,
}

/// Result of a success redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletePaymentRedirectResult {
    pub payment_id: PaymentId,
    pub status: PaymentStatus,
    /// False when the redirect was a replay.
    pub transitioned: bool,
}

/// Handler for provider success redirects.
pub struct CompletePaymentRedirectHandler {
    payments: Arc<dyn PaymentRepository>,
    clock: Arc<dyn Clock>,
}

impl CompletePaymentRedirectHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { payments, clock }
    }

    pub async fn handle(
        &self,
        cmd: CompletePaymentRedirectCommand,
    ) -> Result<CompletePaymentRedirectResult, BillingError> {
        let (payment, outcome) = apply_payment_event(
            &*self.payments,
            &*self.clock,
            &cmd.payment_id,
            Payment::mark_paid,
        )
        .await
        .map_err(|e| {
            tracing::warn!(payment_id = %cmd.payment_id, error = %e, "Success redirect failed");
            e
        })?;

        tracing::info!(
            payment_id = %payment.id,
            status = %payment.status,
            transitioned = outcome.is_applied(),
            "Success redirect handled"
        );

        Ok(CompletePaymentRedirectResult {
            payment_id: payment.id,
            status: payment.status,
            transitioned: outcome.is_applied(),
        })
    }
}
