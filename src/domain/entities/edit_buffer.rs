use serde::{Deserialize, Serialize};

use super::Product;

/// Which submit action the product form currently allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Idle,
    Creating,
    Editing,
}

impl FormMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Editing)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FormMode::Idle => "idle",
            FormMode::Creating => "creating",
            FormMode::Editing => "editing",
        }
    }
}

/// Scratch copy of the product fields while creating or editing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBuffer {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: String,
}

impl EditBuffer {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
