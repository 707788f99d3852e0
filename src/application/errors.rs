//! Application layer errors

use thiserror::Error;

/// Top-level storefront errors
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Remote product store errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Cart operation errors
#[derive(Error, Debug)]
pub enum CartError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Amount out of range for {0}")]
    Overflow(String),
}

/// Product form errors
#[derive(Error, Debug)]
pub enum FormError {
    #[error("Add is disabled while editing a product")]
    AddWhileEditing,

    #[error("Update requires a product selected for editing")]
    UpdateWithoutSelection,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
