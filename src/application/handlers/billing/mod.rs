//! Billing handlers.
//!
//! ## Commands
//! - Purchasing a product (creates a `created` payment)
//! - Handling the provider success redirect (`created -> paid`)
//! - Handling the provider callback (`-> confirm`, digest checked first)
//!
//! ## Queries
//! - Listing a tenant's products

mod complete_payment_redirect;
mod confirm_payment;
mod list_products;
mod payment_transition;
mod purchase_product;

#[cfg(test)]
mod test_support;

// Commands
pub use complete_payment_redirect::{
    CompletePaymentRedirectCommand, CompletePaymentRedirectHandler, CompletePaymentRedirectResult,
};
pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult};
pub use purchase_product::{PurchaseProductCommand, PurchaseProductHandler, PurchaseProductResult};

// Queries
pub use list_products::{ListProductsHandler, ListProductsQuery, ListProductsResult, PRODUCT_LIST_LIMIT};

pub use payment_transition::MAX_TRANSITION_ATTEMPTS;
