//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change payments and users; query handlers only read.

pub mod handlers;

pub use handlers::{
    // Billing handlers
    CompletePaymentRedirectCommand, CompletePaymentRedirectHandler, CompletePaymentRedirectResult,
    ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult, ListProductsHandler,
    ListProductsQuery, ListProductsResult, PurchaseProductCommand, PurchaseProductHandler,
    PurchaseProductResult,
    // Account handlers
    LoginCodeSettings, RequestLoginCodeCommand, RequestLoginCodeHandler, RequestLoginCodeResult,
    VerifyLoginCodeCommand, VerifyLoginCodeHandler, VerifyLoginCodeResult,
};
