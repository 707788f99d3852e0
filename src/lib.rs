//! radshop - storefront and product admin client for the RADSHOP product API
//!
//! Layers follow the usual split:
//! - `domain`: products, cart reducers, edit buffer, and the storage/API traits
//! - `application`: cart ledger, catalog view, product form, storefront controller
//! - `infrastructure`: config, HTTP client, storage backends, console rendering

pub mod domain;
pub mod application;
pub mod infrastructure;
