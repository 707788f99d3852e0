//! Storefront controller - the single owner of application state

use std::sync::Arc;

use crate::application::errors::{CartError, ShopError};
use crate::application::services::{CartLedger, CatalogView, FormController};
use crate::domain::entities::Product;
use crate::domain::traits::ProductApi;

/// Catalog, cart and product form behind one controller.
///
/// Each public method corresponds to one user action and runs to
/// completion before the next one is dispatched.
pub struct Storefront {
    api: Arc<dyn ProductApi>,
    catalog: CatalogView,
    cart: CartLedger,
    form: FormController,
    refresh_after_mutation: bool,
}

impl Storefront {
    pub fn new(api: Arc<dyn ProductApi>, catalog: CatalogView, cart: CartLedger, form: FormController) -> Self {
        Self {
            api,
            catalog,
            cart,
            form,
            refresh_after_mutation: true,
        }
    }

    /// Whether create/update/delete refetch the product list on success
    pub fn with_refresh_after_mutation(mut self, enabled: bool) -> Self {
        self.refresh_after_mutation = enabled;
        self
    }

    pub fn catalog(&self) -> &CatalogView {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogView {
        &mut self.catalog
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    /// Fetch the product list from the remote store
    pub async fn refresh(&mut self) -> Result<usize, ShopError> {
        let products = self.api.list().await?;
        let count = products.len();
        self.catalog.set_products(products);
        tracing::info!("Fetched {} products", count);
        Ok(count)
    }

    fn product(&self, id: &str) -> Result<Product, ShopError> {
        self.catalog
            .find(id)
            .cloned()
            .ok_or_else(|| CartError::UnknownProduct(id.to_string()).into())
    }

    pub async fn add_to_cart(&mut self, product_id: &str) -> Result<u32, ShopError> {
        let product = self.product(product_id)?;
        self.cart.add_or_increment(&product).await
    }

    pub async fn increment(&mut self, line_id: &str) -> Result<bool, ShopError> {
        self.cart.increment(line_id).await
    }

    pub async fn decrement(&mut self, line_id: &str) -> Result<bool, ShopError> {
        self.cart.decrement(line_id).await
    }

    pub async fn remove_from_cart(&mut self, line_id: &str) -> Result<bool, ShopError> {
        self.cart.remove(line_id).await
    }

    pub async fn clear_cart(&mut self) -> Result<(), ShopError> {
        self.cart.clear().await
    }

    /// Load a catalog product into the form for editing
    pub fn edit(&mut self, product_id: &str) -> Result<(), ShopError> {
        let product = self
            .catalog
            .find(product_id)
            .cloned()
            .ok_or_else(|| ShopError::NotFound(format!("product {}", product_id)))?;
        self.form.begin_edit(&product);
        Ok(())
    }

    pub async fn create_product(&mut self) -> Result<(), ShopError> {
        self.form.create(self.api.as_ref()).await?;
        self.after_mutation().await
    }

    pub async fn update_product(&mut self) -> Result<(), ShopError> {
        self.form.update(self.api.as_ref()).await?;
        self.after_mutation().await
    }

    pub async fn delete_product(&mut self, product_id: &str) -> Result<(), ShopError> {
        let product = self
            .catalog
            .find(product_id)
            .cloned()
            .ok_or_else(|| ShopError::NotFound(format!("product {}", product_id)))?;
        self.form.delete(self.api.as_ref(), &product).await?;
        self.after_mutation().await
    }

    async fn after_mutation(&mut self) -> Result<(), ShopError> {
        if self.refresh_after_mutation {
            self.refresh().await?;
        }
        Ok(())
    }
}
