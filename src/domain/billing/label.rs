//! Payment label codec.
//!
//! A label is `"{payment_id}:{product_id}:{tenant_id}"`. It is never stored;
//! it rides through the provider redirect as a custom field and comes back
//! verbatim in the callback, where it tells us which tenant secret to use and
//! which payment to confirm.

use crate::domain::foundation::{PaymentId, ProductId, TenantId, LABEL_DELIMITER};
use std::fmt;
use std::str::FromStr;

use super::BillingError;

/// Correlation token carried through the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    pub payment_id: PaymentId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
}

impl Label {
    pub fn new(payment_id: PaymentId, product_id: ProductId, tenant_id: TenantId) -> Self {
        Self {
            payment_id,
            product_id,
            tenant_id,
        }
    }

    /// Parses a label returned by the provider.
    ///
    /// The first three components are taken positionally; anything after the
    /// third is ignored. Fewer than three components is `MalformedLabel`.
    /// Empty components are accepted here and fail later at lookup.
    pub fn parse(input: &str) -> Result<Self, BillingError> {
        let mut parts = input.split(LABEL_DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(payment), Some(product), Some(tenant)) => Ok(Self {
                payment_id: PaymentId::from_label_component(payment),
                product_id: ProductId::from_label_component(product),
                tenant_id: TenantId::from_label_component(tenant),
            }),
            _ => Err(BillingError::MalformedLabel(input.to_string())),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}",
            self.payment_id,
            self.product_id,
            self.tenant_id,
            d = LABEL_DELIMITER
        )
    }
}

impl FromStr for Label {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
