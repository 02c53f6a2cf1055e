//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod billing;

pub use account::{
    LoginCodeSettings, RequestLoginCodeCommand, RequestLoginCodeHandler, RequestLoginCodeResult,
    VerifyLoginCodeCommand, VerifyLoginCodeHandler, VerifyLoginCodeResult,
};
pub use billing::{
    CompletePaymentRedirectCommand, CompletePaymentRedirectHandler, CompletePaymentRedirectResult,
    ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult, ListProductsHandler,
    ListProductsQuery, ListProductsResult, PurchaseProductCommand, PurchaseProductHandler,
    PurchaseProductResult,
};
