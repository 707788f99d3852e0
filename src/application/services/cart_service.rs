//! Cart ledger - write-through persistence around the cart reducers

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::application::errors::{CartError, ShopError, StorageError};
use crate::domain::entities::{Cart, CartLine, Product};
use crate::domain::traits::Store;

/// Storage key holding the cart snapshot
pub const CART_KEY: &str = "cartItems";

/// Cart plus the store its snapshot is written to.
///
/// Every mutating call runs the reducer on the in-memory cart and then
/// overwrites the whole persisted snapshot before returning.
pub struct CartLedger {
    cart: Cart,
    store: Arc<dyn Store>,
    key: String,
}

impl CartLedger {
    /// Empty ledger; nothing is read from the store
    pub fn new(store: Arc<dyn Store>, key: impl Into<String>) -> Self {
        Self {
            cart: Cart::new(),
            store,
            key: key.into(),
        }
    }

    /// Ledger seeded from the persisted snapshot, empty if none exists
    pub async fn load(store: Arc<dyn Store>, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        let cart = match store.get(&key).await? {
            Some(raw) => {
                let lines: Vec<CartLine> = serde_json::from_str(&raw)
                    .map_err(|e| StorageError::Serialization(format!("cart snapshot under '{}': {}", key, e)))?;
                Cart::from_lines(lines)
                    .map_err(|e| StorageError::Serialization(format!("cart snapshot under '{}': {}", key, e)))?
            }
            None => Cart::new(),
        };
        tracing::debug!("Loaded cart with {} lines", cart.len());
        Ok(Self { cart, store, key })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn subtotal_total(&self) -> Result<Decimal, CartError> {
        self.cart.subtotal_total()
    }

    pub async fn add_or_increment(&mut self, product: &Product) -> Result<u32, ShopError> {
        let qty = self.cart.add_or_increment(product)?;
        tracing::info!("Cart: {} x{}", product.id, qty);
        self.save().await?;
        Ok(qty)
    }

    /// Returns false when the line is not in the cart
    pub async fn increment(&mut self, id: &str) -> Result<bool, ShopError> {
        let changed = self.cart.increment(id)?;
        if !changed {
            tracing::warn!("Increment ignored, {} is not in the cart", id);
        }
        self.save().await?;
        Ok(changed)
    }

    pub async fn decrement(&mut self, id: &str) -> Result<bool, ShopError> {
        let changed = self.cart.decrement(id)?;
        if !changed {
            tracing::warn!("Decrement ignored, {} is not in the cart", id);
        }
        self.save().await?;
        Ok(changed)
    }

    pub async fn remove(&mut self, id: &str) -> Result<bool, ShopError> {
        let removed = self.cart.remove(id)?;
        self.save().await?;
        Ok(removed)
    }

    pub async fn clear(&mut self) -> Result<(), ShopError> {
        self.cart.clear();
        self.save().await?;
        Ok(())
    }

    /// Overwrite the persisted snapshot with the current cart
    pub async fn save(&self) -> Result<(), StorageError> {
        let snapshot = serde_json::to_string(&self.cart)?;
        self.store.set(&self.key, &snapshot).await
    }
}
