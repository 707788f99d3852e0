use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::application::errors::ApiError;
use crate::domain::entities::{EditBuffer, Product};

/// Body of a product creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub image: String,
    pub description: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl NewProduct {
    pub fn from_buffer(buffer: &EditBuffer, price: Decimal) -> Self {
        Self {
            name: buffer.name.clone(),
            image: buffer.image.clone(),
            description: buffer.description.clone(),
            category: buffer.category.clone(),
            price,
        }
    }
}

/// Body of a product update request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: String,
}

impl ProductUpdate {
    pub fn from_buffer(buffer: &EditBuffer) -> Self {
        Self {
            product_id: buffer.id.clone(),
            name: buffer.name.clone(),
            category: buffer.category.clone(),
            description: buffer.description.clone(),
            image: buffer.image.clone(),
        }
    }
}

/// ProductApi trait - the remote product store
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Fetch every product
    async fn list(&self) -> Result<Vec<Product>, ApiError>;

    async fn create(&self, product: &NewProduct) -> Result<(), ApiError>;

    async fn update(&self, update: &ProductUpdate) -> Result<(), ApiError>;

    async fn delete(&self, product_id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bodies_match_wire_format() {
        let buffer = EditBuffer {
            id: "42".to_string(),
            name: "Salade".to_string(),
            category: "Entrée".to_string(),
            description: "verte".to_string(),
            image: "http://img/s.png".to_string(),
        };

        let create = serde_json::to_value(NewProduct::from_buffer(&buffer, Decimal::new(999, 2))).unwrap();
        assert_eq!(create["price"], 9.99);
        assert!(create.get("id").is_none());

        let update = serde_json::to_value(ProductUpdate::from_buffer(&buffer)).unwrap();
        assert_eq!(update["productId"], "42");
        assert_eq!(update["name"], "Salade");
        assert!(update.get("price").is_none());
    }
}
