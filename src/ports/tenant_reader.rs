//! Tenant lookup port.
//!
//! Supplies the tenant secret used to authenticate provider callbacks and
//! the payout wallet shown on the purchase form.

use async_trait::async_trait;

use crate::domain::billing::Tenant;
use crate::domain::foundation::{DomainError, TenantId};

/// Read-only access to provisioned tenants.
#[async_trait]
pub trait TenantReader: Send + Sync {
    /// Finds a tenant by id. Returns `None` if not provisioned.
    async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, DomainError>;
}
