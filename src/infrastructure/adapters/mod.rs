//! Presentation adapters

pub mod console;
