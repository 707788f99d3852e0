//! Application services - cart, catalog and form orchestration

pub mod cart_service;
pub mod catalog_service;
pub mod form_service;
pub mod storefront;

pub use cart_service::CartLedger;
pub use catalog_service::CatalogView;
pub use form_service::FormController;
pub use storefront::Storefront;
