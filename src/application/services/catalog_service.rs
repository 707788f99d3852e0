//! Catalog view - category set, category filter and pagination

use crate::domain::entities::Product;

/// Products shown per catalog page
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Distinct categories in first-seen order
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for product in products {
        if !seen.iter().any(|c| c == &product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

/// Products of `category` on page `page_index` (zero-based).
/// Out-of-range pages are empty.
pub fn page<'a>(products: &'a [Product], category: &str, page_index: usize, page_size: usize) -> Vec<&'a Product> {
    let start = page_index.saturating_mul(page_size);
    products
        .iter()
        .filter(|p| p.category == category)
        .skip(start)
        .take(page_size)
        .collect()
}

/// Page count over the whole, unfiltered product list
pub fn page_count(products: &[Product], page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    products.len().div_ceil(page_size)
}

/// Page count over the products of a single category
pub fn category_page_count(products: &[Product], category: &str, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    products.iter().filter(|p| p.category == category).count().div_ceil(page_size)
}

/// Fetched products plus the current category and page selection
#[derive(Debug, Clone)]
pub struct CatalogView {
    products: Vec<Product>,
    selected_category: String,
    page_index: usize,
    page_size: usize,
}

impl CatalogView {
    pub fn new(default_category: impl Into<String>, page_size: usize) -> Self {
        Self {
            products: Vec::new(),
            selected_category: default_category.into(),
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Replace the product list with a fresh fetch. The selection is kept.
    pub fn set_products(&mut self, products: Vec<Product>) {
        tracing::debug!("Catalog refreshed with {} products", products.len());
        self.products = products;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.products)
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Switch category and go back to the first page
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
        self.page_index = 0;
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page of the selected category
    pub fn visible(&self) -> Vec<&Product> {
        page(&self.products, &self.selected_category, self.page_index, self.page_size)
    }

    pub fn page_count(&self) -> usize {
        page_count(&self.products, self.page_size)
    }

    pub fn category_page_count(&self) -> usize {
        category_page_count(&self.products, &self.selected_category, self.page_size)
    }
}
