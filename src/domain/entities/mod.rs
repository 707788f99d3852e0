//! Domain entities - Core business objects with no external dependencies

pub mod product;
pub mod cart;
pub mod edit_buffer;

pub use product::Product;
pub use cart::{Cart, CartLine};
pub use edit_buffer::{EditBuffer, FormMode};
