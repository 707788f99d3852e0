//! In-process product store, used by tests and offline runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::application::errors::ApiError;
use crate::domain::entities::Product;
use crate::domain::traits::{NewProduct, ProductApi, ProductUpdate};

#[derive(Default)]
pub struct MemoryProductApi {
    products: Mutex<Vec<Product>>,
    created: Mutex<Vec<NewProduct>>,
    updated: Mutex<Vec<ProductUpdate>>,
    next_id: AtomicU64,
    failing: AtomicBool,
}

impl MemoryProductApi {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products),
            ..Self::default()
        }
    }

    /// Every call fails with a network error
    pub fn failing(self) -> Self {
        self.set_failing(true);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn products(&self) -> Vec<Product> {
        lock(&self.products).clone()
    }

    /// Creation requests received so far
    pub fn created(&self) -> Vec<NewProduct> {
        lock(&self.created).clone()
    }

    /// Update requests received so far
    pub fn updated(&self) -> Vec<ProductUpdate> {
        lock(&self.updated).clone()
    }

    fn guard(&self) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl ProductApi for MemoryProductApi {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.guard()?;
        Ok(self.products())
    }

    async fn create(&self, product: &NewProduct) -> Result<(), ApiError> {
        self.guard()?;
        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = Product::new(id, product.name.clone(), product.category.clone(), product.price)
            .with_description(product.description.clone())
            .with_image(product.image.clone());
        lock(&self.products).push(stored);
        lock(&self.created).push(product.clone());
        Ok(())
    }

    async fn update(&self, update: &ProductUpdate) -> Result<(), ApiError> {
        self.guard()?;
        let mut products = lock(&self.products);
        let product = products
            .iter_mut()
            .find(|p| p.id == update.product_id)
            .ok_or_else(|| ApiError::Status { status: 404, body: format!("no product {}", update.product_id) })?;
        product.name = update.name.clone();
        product.category = update.category.clone();
        product.description = update.description.clone();
        product.image = update.image.clone();
        drop(products);
        lock(&self.updated).push(update.clone());
        Ok(())
    }

    async fn delete(&self, product_id: &str) -> Result<(), ApiError> {
        self.guard()?;
        let mut products = lock(&self.products);
        let before = products.len();
        products.retain(|p| p.id != product_id);
        if products.len() == before {
            return Err(ApiError::Status { status: 404, body: format!("no product {}", product_id) });
        }
        Ok(())
    }
}
