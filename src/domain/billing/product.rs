//! Product entity.

use crate::domain::foundation::{Amount, ProductId, TenantId, Timestamp};
use serde::{Deserialize, Serialize};

/// Something a tenant sells. Read-only from the billing flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub tenant_id: TenantId,
    pub name: String,
    pub description: String,
    pub price: Amount,
    pub enabled: bool,
    pub created_at: Timestamp,
}

impl Product {
    /// True when the product belongs to `tenant_id`.
    pub fn is_sold_by(&self, tenant_id: &TenantId) -> bool {
        &self.tenant_id == tenant_id
    }
}
