//! Compare-and-set driver for payment status changes.
//!
//! Both the success redirect and the provider callback change a payment's
//! status. They read the payment, apply the lifecycle rule in memory, and
//! write the new status only if nobody changed it in between. When the write
//! loses a race the payment is re-read and the rule applied again; every
//! rule is monotonic, so the retry either lands or becomes a no-op.

use crate::domain::billing::{BillingError, Payment, TransitionOutcome};
use crate::domain::foundation::{PaymentId, Timestamp};
use crate::ports::{Clock, PaymentRepository};

/// Attempts before giving up on a payment that keeps changing.
pub const MAX_TRANSITION_ATTEMPTS: u32 = 3;

/// Lifecycle event applied to a freshly loaded payment.
pub type PaymentEvent = fn(&mut Payment, Timestamp) -> TransitionOutcome;

/// Loads the payment, applies `event`, and persists the status change.
///
/// # Errors
///
/// - `NotFound` if the payment does not exist
/// - `PersistenceFailure` if the store fails or every attempt loses its race
pub async fn apply_payment_event(
    payments: &dyn PaymentRepository,
    clock: &dyn Clock,
    id: &PaymentId,
    event: PaymentEvent,
) -> Result<(Payment, TransitionOutcome), BillingError> {
    for attempt in 1..=MAX_TRANSITION_ATTEMPTS {
        let mut payment = payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| BillingError::payment_not_found(id.as_str()))?;

        let outcome = event(&mut payment, clock.now());
        let TransitionOutcome::Applied { from } = outcome else {
            return Ok((payment, outcome));
        };

        if payments
            .update_status(id, from, payment.status, payment.updated_at)
            .await?
        {
            return Ok((payment, outcome));
        }

        tracing::debug!(payment_id = %id, attempt, "Payment status changed concurrently, retrying");
    }

    Err(BillingError::PersistenceFailure(format!(
        "payment '{}' kept changing after {} attempts",
        id, MAX_TRANSITION_ATTEMPTS
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::PaymentStatus;

    use super::super::test_support::{clock, payment, MockPaymentRepository};

    fn pay1() -> PaymentId {
        PaymentId::new("pay1").unwrap()
    }

    #[tokio::test]
    async fn applies_transition_on_first_attempt() {
        let repo = MockPaymentRepository::with(payment("pay1", PaymentStatus::Created));
        let clock = clock();

        let (payment, outcome) = apply_payment_event(&repo, &*clock, &pay1(), Payment::mark_paid)
            .await
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Applied { from: PaymentStatus::Created });
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(repo.stored(&pay1()).unwrap().status, PaymentStatus::Paid);
        assert_eq!(repo.update_calls(), 1);
    }

    #[tokio::test]
    async fn unchanged_event_skips_the_write() {
        let repo = MockPaymentRepository::with(payment("pay1", PaymentStatus::Confirm));
        let clock = clock();

        let (payment, outcome) = apply_payment_event(&repo, &*clock, &pay1(), Payment::confirm)
            .await
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Unchanged);
        assert_eq!(payment.status, PaymentStatus::Confirm);
        assert_eq!(repo.update_calls(), 0);
    }

    #[tokio::test]
    async fn lost_race_rereads_and_reapplies() {
        // A callback confirmed the payment between our read and write.
        let repo = MockPaymentRepository::with(payment("pay1", PaymentStatus::Created))
            .losing_races(1, Some(PaymentStatus::Confirm));
        let clock = clock();

        let (payment, outcome) = apply_payment_event(&repo, &*clock, &pay1(), Payment::mark_paid)
            .await
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Unchanged);
        assert_eq!(payment.status, PaymentStatus::Confirm);
        assert_eq!(repo.stored(&pay1()).unwrap().status, PaymentStatus::Confirm);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let repo = MockPaymentRepository::with(payment("pay1", PaymentStatus::Paid))
            .losing_races(MAX_TRANSITION_ATTEMPTS, None);
        let clock = clock();

        let result = apply_payment_event(&repo, &*clock, &pay1(), Payment::confirm).await;

        assert!(matches!(result, Err(BillingError::PersistenceFailure(_))));
        assert_eq!(repo.update_calls(), MAX_TRANSITION_ATTEMPTS);
        assert_eq!(repo.stored(&pay1()).unwrap().status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn missing_payment_is_not_found() {
        let repo = MockPaymentRepository::new();
        let clock = clock();

        let result = apply_payment_event(&repo, &*clock, &pay1(), Payment::mark_paid).await;

        assert!(matches!(result, Err(BillingError::NotFound { entity: "payment", .. })));
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_persistence_failure() {
        let repo = MockPaymentRepository::with(payment("pay1", PaymentStatus::Created)).failing_update();
        let clock = clock();

        let result = apply_payment_event(&repo, &*clock, &pay1(), Payment::mark_paid).await;

        let err = result.unwrap_err();
        assert!(err.is_retryable());
    }
}
