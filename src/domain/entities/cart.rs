//! Cart lines and the reducers that keep them consistent

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;
use crate::application::errors::CartError;

/// One product in the cart with its running quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

impl CartLine {
    /// A fresh line for `product` with quantity 1
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price: product.price,
            quantity: 1,
            total_price: product.price,
        }
    }

    fn recompute(&mut self) -> Result<(), CartError> {
        self.total_price = self
            .price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| CartError::Overflow(self.id.clone()))?;
        Ok(())
    }
}

/// Ordered cart; insertion order is display order.
///
/// Every mutation works on a copy of the lines and ends with a
/// reconciliation pass, so `total_price == price * quantity` holds for all
/// lines, not only the one that was touched. A mutation whose totals would
/// not fit in a `Decimal` is rejected and leaves the cart as it was.
/// Persistence is not handled here, see `CartLedger` for the write-through
/// wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines. Lines with quantity 0 are dropped
    /// and lines sharing an id are merged into the first one.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, CartError> {
        let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match merged.iter_mut().find(|l| l.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(line.quantity)
                        .ok_or_else(|| CartError::Overflow(line.id.clone()))?;
                }
                None => merged.push(line),
            }
        }
        Ok(Self { lines: reconciled(merged)? })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Bump the line for `product`, or append it with quantity 1.
    /// Returns the resulting quantity.
    pub fn add_or_increment(&mut self, product: &Product) -> Result<u32, CartError> {
        if self.bump(&product.id)? {
            return Ok(self.get(&product.id).map(|l| l.quantity).unwrap_or(1));
        }
        let mut next = self.lines.clone();
        next.push(CartLine::from_product(product));
        self.lines = reconciled(next)?;
        Ok(1)
    }

    /// Bump an existing line. Returns false (and changes nothing) when absent.
    pub fn increment(&mut self, id: &str) -> Result<bool, CartError> {
        self.bump(id)
    }

    /// Drop one unit; a line at quantity 1 is removed entirely.
    /// Returns false when the line is absent.
    pub fn decrement(&mut self, id: &str) -> Result<bool, CartError> {
        let Some(pos) = self.lines.iter().position(|l| l.id == id) else {
            return Ok(false);
        };
        let mut next = self.lines.clone();
        if next[pos].quantity <= 1 {
            next.remove(pos);
        } else {
            next[pos].quantity -= 1;
        }
        self.lines = reconciled(next)?;
        Ok(true)
    }

    /// Delete the line matching `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, CartError> {
        let next: Vec<CartLine> = self.lines.iter().filter(|l| l.id != id).cloned().collect();
        if next.len() == self.lines.len() {
            return Ok(false);
        }
        self.lines = reconciled(next)?;
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of every line's `total_price`; zero for an empty cart.
    pub fn subtotal_total(&self) -> Result<Decimal, CartError> {
        subtotal(&self.lines)
    }

    fn bump(&mut self, id: &str) -> Result<bool, CartError> {
        let Some(pos) = self.lines.iter().position(|l| l.id == id) else {
            return Ok(false);
        };
        let mut next = self.lines.clone();
        next[pos].quantity = next[pos]
            .quantity
            .checked_add(1)
            .ok_or_else(|| CartError::Overflow(id.to_string()))?;
        self.lines = reconciled(next)?;
        Ok(true)
    }
}

/// Recompute every line total and make sure the cart total is representable
fn reconciled(mut lines: Vec<CartLine>) -> Result<Vec<CartLine>, CartError> {
    for line in &mut lines {
        line.recompute()?;
    }
    subtotal(&lines)?;
    Ok(lines)
}

fn subtotal(lines: &[CartLine]) -> Result<Decimal, CartError> {
    lines.iter().try_fold(Decimal::ZERO, |acc, l| {
        acc.checked_add(l.total_price)
            .ok_or_else(|| CartError::Overflow(l.id.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("product {}", id), "Plat", Decimal::new(cents, 2))
    }

    fn assert_consistent(cart: &Cart) {
        for line in cart.lines() {
            assert_eq!(line.total_price, line.price * Decimal::from(line.quantity), "line {}", line.id);
        }
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = Cart::new();
        let qty = cart.add_or_increment(&product("a", 300)).unwrap();

        assert_eq!(qty, 1);
        assert_eq!(cart.len(), 1);
        let line = cart.get("a").unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.total_price, Decimal::new(300, 2));
    }

    #[test]
    fn test_add_existing_increments_instead_of_duplicating() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("a", 300)).unwrap();
        cart.add_or_increment(&product("b", 150)).unwrap();
        let qty = cart.add_or_increment(&product("a", 300)).unwrap();

        assert_eq!(qty, 2);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get("a").unwrap().total_price, Decimal::new(600, 2));
        assert_eq!(cart.lines()[0].id, "a");
        assert_consistent(&cart);
    }

    #[test]
    fn test_reconciliation_repairs_untouched_lines() {
        let mut stale = CartLine::from_product(&product("b", 250));
        stale.quantity = 3;
        let mut cart = Cart { lines: vec![CartLine::from_product(&product("a", 100)), stale] };

        assert!(cart.increment("a").unwrap());
        assert_eq!(cart.get("b").unwrap().total_price, Decimal::new(750, 2));
        assert_consistent(&cart);
    }

    #[test]
    fn test_increment_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("a", 100)).unwrap();
        let before = cart.clone();

        assert!(!cart.increment("zzz").unwrap());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("a", 100)).unwrap();
        cart.add_or_increment(&product("a", 100)).unwrap();
        let before = cart.clone();

        assert!(!cart.decrement("zzz").unwrap());
        assert_eq!(cart, before);
        assert_eq!(cart.get("a").unwrap().quantity, 2);
    }

    #[test]
    fn test_decrement_from_one_removes_line() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("a", 100)).unwrap();
        cart.add_or_increment(&product("b", 200)).unwrap();

        assert!(cart.decrement("a").unwrap());
        assert!(!cart.contains("a"));
        assert_eq!(cart.len(), 1);
        assert_consistent(&cart);
    }

    #[test]
    fn test_decrement_from_two() {
        let mut cart = Cart::new();
        let p = product("a", 425);
        cart.add_or_increment(&p).unwrap();
        cart.add_or_increment(&p).unwrap();

        assert!(cart.decrement("a").unwrap());
        let line = cart.get("a").unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.total_price, p.price);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("a", 100)).unwrap();
        cart.add_or_increment(&product("b", 100)).unwrap();

        assert!(cart.remove("a").unwrap());
        assert!(!cart.remove("a").unwrap());
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_total() {
        assert_eq!(Cart::new().subtotal_total().unwrap(), Decimal::ZERO);

        let mut a = CartLine::from_product(&product("a", 1000));
        a.total_price = Decimal::new(1000, 2);
        let b = CartLine::from_product(&product("b", 550));
        let cart = Cart { lines: vec![a, b] };
        assert_eq!(cart.subtotal_total().unwrap(), Decimal::new(1550, 2));
    }

    #[test]
    fn test_huge_price_is_rejected_not_panicking() {
        let huge: Product = serde_json::from_str(r#"{"_id":"h","name":"Yacht","category":"Plat","price":5e28}"#).unwrap();
        let mut cart = Cart::new();
        cart.add_or_increment(&huge).unwrap();
        let before = cart.clone();

        let err = cart.add_or_increment(&huge).unwrap_err();
        assert!(matches!(err, CartError::Overflow(ref id) if id == "h"));
        assert!(matches!(cart.increment("h"), Err(CartError::Overflow(_))));
        assert_eq!(cart, before);
        assert_eq!(cart.get("h").unwrap().quantity, 1);
    }

    #[test]
    fn test_cart_total_overflow_is_rejected() {
        let big = |id: &str| Product::new(id, id, "Plat", Decimal::MAX);
        let mut cart = Cart::new();
        cart.add_or_increment(&big("x")).unwrap();

        assert!(matches!(cart.add_or_increment(&big("y")), Err(CartError::Overflow(_))));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.subtotal_total().unwrap(), Decimal::MAX);
    }

    #[test]
    fn test_from_lines_drops_empty_and_merges_duplicates() {
        let mut zero = CartLine::from_product(&product("a", 100));
        zero.quantity = 0;
        let b1 = CartLine::from_product(&product("b", 200));
        let mut b2 = CartLine::from_product(&product("b", 200));
        b2.quantity = 2;

        let cart = Cart::from_lines(vec![zero, b1, b2]).unwrap();
        assert_eq!(cart.len(), 1);
        assert!(!cart.contains("a"));
        assert_eq!(cart.get("b").unwrap().quantity, 3);
        assert_consistent(&cart);
    }

    #[test]
    fn test_snapshot_uses_storage_field_names() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("a", 300)).unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json[0]["_id"], "a");
        assert_eq!(json[0]["quantity"], 1);
        assert_eq!(json[0]["totalPrice"], 3.0);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
