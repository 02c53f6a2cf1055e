//! Payment aggregate.
//!
//! One payment per purchase attempt. Name, description and amount are copied
//! from the product at creation and never change afterwards; only the status
//! moves, and only forward.

use crate::domain::foundation::{Amount, PaymentId, ProductId, TenantId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use super::{Label, PaymentStatus, Product};

/// Result of applying a lifecycle event to a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Status moved from `from` to the payment's current status.
    Applied { from: PaymentStatus },

    /// Event was a replay; nothing changed.
    Unchanged,
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied { .. })
    }
}

/// Payment aggregate.
///
/// # Invariants
///
/// - `name`, `description` and `amount` are snapshots taken at creation
/// - status never moves backward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub tenant_id: TenantId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payment {
    /// Starts a new payment for `product`, snapshotting its display data and price.
    pub fn create(id: PaymentId, product: &Product, user_id: UserId, now: Timestamp) -> Self {
        Self {
            id,
            tenant_id: product.tenant_id.clone(),
            product_id: product.id.clone(),
            user_id,
            name: product.name.clone(),
            description: product.description.clone(),
            amount: product.price,
            status: PaymentStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }

    /// Label the provider carries back to us for this payment.
    pub fn label(&self) -> Label {
        Label::new(
            self.id.clone(),
            self.product_id.clone(),
            self.tenant_id.clone(),
        )
    }

    /// Applies the buyer's return from the provider success redirect.
    ///
    /// Only `created` moves (to `paid`); replays leave the payment untouched.
    pub fn mark_paid(&mut self, now: Timestamp) -> TransitionOutcome {
        let next = self.status.after_success_redirect();
        self.apply(next, now)
    }

    /// Applies an authenticated provider callback.
    ///
    /// Any unconfirmed status moves to `confirm`; repeats are no-ops.
    pub fn confirm(&mut self, now: Timestamp) -> TransitionOutcome {
        let next = self.status.after_authentic_callback();
        self.apply(next, now)
    }

    fn apply(&mut self, next: Option<PaymentStatus>, now: Timestamp) -> TransitionOutcome {
        match next {
            Some(status) => {
                let from = self.status;
                self.status = status;
                self.updated_at = now;
                TransitionOutcome::Applied { from }
            }
            None => TransitionOutcome::Unchanged,
        }
    }
}
