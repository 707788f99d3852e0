//! Remote product store clients

pub mod http;
pub mod memory;
pub mod retry;

pub use http::HttpProductApi;
pub use memory::MemoryProductApi;
pub use retry::{BackoffStrategy, RetryPolicy};
