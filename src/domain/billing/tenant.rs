//! Tenant ("application") entity.

use crate::domain::foundation::TenantId;
use secrecy::SecretString;

/// Billing customer owning products and a provider callback secret.
///
/// Provisioned outside this service and read-only here. `Debug` redacts the
/// secret.
#[derive(Debug, Clone)]
pub struct Tenant {
    pub id: TenantId,

    /// Shared secret the provider mixes into every callback digest.
    pub secret: SecretString,

    /// Provider wallet that receives the tenant's payouts.
    pub wallet: String,
}

impl Tenant {
    pub fn new(id: TenantId, secret: SecretString, wallet: impl Into<String>) -> Self {
        Self {
            id,
            secret,
            wallet: wallet.into(),
        }
    }
}
