//! Product lookup port.

use async_trait::async_trait;

use crate::domain::billing::Product;
use crate::domain::foundation::{DomainError, ProductId, TenantId};

/// Read-only access to a tenant's catalogue.
#[async_trait]
pub trait ProductReader: Send + Sync {
    /// Finds a product that belongs to `tenant_id`.
    ///
    /// Returns `None` if the product is absent or owned by another tenant.
    async fn find_for_tenant(
        &self,
        tenant_id: &TenantId,
        product_id: &ProductId,
    ) -> Result<Option<Product>, DomainError>;

    /// Lists enabled products of a tenant, newest first, at most `limit`.
    async fn list_enabled(
        &self,
        tenant_id: &TenantId,
        limit: usize,
    ) -> Result<Vec<Product>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ProductReader) {}
    }
}
