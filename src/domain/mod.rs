//! Domain layer - Core business logic with no I/O
//! 
//! This layer contains:
//! - Entities: Product, cart lines and the edit buffer
//! - Traits: Abstractions for infrastructure (ProductApi, Store)

pub mod entities;
pub mod traits;
