//! Payment repository port.
//!
//! Payments are inserted once and afterwards only their status moves. Status
//! writes are compare-and-set so a replayed redirect racing a callback can
//! never overwrite a newer status with an older one.

use async_trait::async_trait;

use crate::domain::billing::{Payment, PaymentStatus};
use crate::domain::foundation::{DomainError, PaymentId, Timestamp};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Inserts a new payment.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the id is already taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Finds a payment by id. Returns `None` if absent.
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    /// Sets the status to `new` only if the stored status is still `expected`.
    ///
    /// Returns `false` when another writer got there first (or the payment
    /// vanished); the caller re-reads and decides again.
    async fn update_status(
        &self,
        id: &PaymentId,
        expected: PaymentStatus,
        new: PaymentStatus,
        updated_at: Timestamp,
    ) -> Result<bool, DomainError>;
}
