//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Api: Remote product store clients
//! - Storage / Database: Durable key-value backends
//! - Adapters: Console rendering

pub mod config;
pub mod api;
pub mod storage;
pub mod database;
pub mod adapters;
