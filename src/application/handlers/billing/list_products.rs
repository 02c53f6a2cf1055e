//! ListProductsHandler - Query handler for a tenant's storefront.

use std::sync::Arc;

use crate::domain::billing::{BillingError, Product};
use crate::domain::foundation::TenantId;
use crate::ports::{ProductReader, TenantReader};

/// Most products a storefront page shows.
pub const PRODUCT_LIST_LIMIT: usize = 100;

/// Query for the products a tenant currently sells.
#[derive(Debug, Clone)]
pub struct ListProductsQuery {
    pub tenant_id: TenantId,
}

/// Enabled products, newest first.
pub type ListProductsResult = Vec<Product>;

/// Handler for listing a tenant's products.
pub struct ListProductsHandler {
    tenants: Arc<dyn TenantReader>,
    products: Arc<dyn ProductReader>,
}

impl ListProductsHandler {
    pub fn new(tenants: Arc<dyn TenantReader>, products: Arc<dyn ProductReader>) -> Self {
        Self { tenants, products }
    }

    pub async fn handle(&self, query: ListProductsQuery) -> Result<ListProductsResult, BillingError> {
        self.tenants
            .find_by_id(&query.tenant_id)
            .await?
            .ok_or_else(|| BillingError::tenant_not_found(query.tenant_id.as_str()))?;

        let products = self
            .products
            .list_enabled(&query.tenant_id, PRODUCT_LIST_LIMIT)
            .await?;

        Ok(products)
    }
}
