//! Domain traits - Abstractions for infrastructure implementations

pub mod product_api;
pub mod store;

pub use product_api::{NewProduct, ProductApi, ProductUpdate};
pub use store::Store;
