//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Cart ledger, catalog view, product form, storefront controller
//! - Errors: Domain-specific errors

pub mod errors;
pub mod services;
