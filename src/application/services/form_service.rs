//! Product form - mirrors one product into an edit buffer and submits it

use rust_decimal::Decimal;

use crate::application::errors::{FormError, ShopError};
use crate::domain::entities::{EditBuffer, FormMode, Product};
use crate::domain::traits::{NewProduct, ProductApi, ProductUpdate};

/// Price sent with every newly created product
pub fn default_placeholder_price() -> Decimal {
    Decimal::new(999, 2)
}

/// Drives the Idle / Creating / Editing cycle of the product form
#[derive(Debug, Clone)]
pub struct FormController {
    buffer: EditBuffer,
    mode: FormMode,
    placeholder_price: Decimal,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(default_placeholder_price())
    }
}

impl FormController {
    pub fn new(placeholder_price: Decimal) -> Self {
        Self {
            buffer: EditBuffer::default(),
            mode: FormMode::Idle,
            placeholder_price,
        }
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode.is_editing()
    }

    /// "Add" is only actionable outside edit mode
    pub fn can_add(&self) -> bool {
        !self.is_editing()
    }

    /// "Update" is only actionable in edit mode
    pub fn can_update(&self) -> bool {
        self.is_editing()
    }

    /// Load `product` into the buffer and switch to edit mode
    pub fn begin_edit(&mut self, product: &Product) {
        tracing::debug!("Editing product {}", product.id);
        self.buffer = EditBuffer::from_product(product);
        self.mode = FormMode::Editing;
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.touch();
        self.buffer.name = value.into();
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        self.touch();
        self.buffer.category = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.touch();
        self.buffer.description = value.into();
    }

    pub fn set_image(&mut self, value: impl Into<String>) {
        self.touch();
        self.buffer.image = value.into();
    }

    /// Send the buffer to the creation endpoint. On success the form is
    /// reset; on failure buffer and mode are left untouched.
    pub async fn create(&mut self, api: &dyn ProductApi) -> Result<(), ShopError> {
        if !self.can_add() {
            return Err(FormError::AddWhileEditing.into());
        }
        let request = NewProduct::from_buffer(&self.buffer, self.placeholder_price);
        api.create(&request).await?;
        tracing::info!("Product '{}' added", request.name);
        self.reset();
        Ok(())
    }

    /// Send the buffer to the update endpoint, then reset the form
    pub async fn update(&mut self, api: &dyn ProductApi) -> Result<(), ShopError> {
        if !self.can_update() {
            return Err(FormError::UpdateWithoutSelection.into());
        }
        let request = ProductUpdate::from_buffer(&self.buffer);
        api.update(&request).await?;
        tracing::info!("Product {} updated", request.product_id);
        self.reset();
        Ok(())
    }

    /// Delete `product` remotely. The form state is not involved.
    pub async fn delete(&self, api: &dyn ProductApi, product: &Product) -> Result<(), ShopError> {
        api.delete(&product.id).await?;
        tracing::info!("Product {} deleted", product.id);
        Ok(())
    }

    /// Discard the buffer and return to idle
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.mode = FormMode::Idle;
    }

    fn touch(&mut self) {
        if self.mode == FormMode::Idle {
            self.mode = FormMode::Creating;
        }
    }
}
