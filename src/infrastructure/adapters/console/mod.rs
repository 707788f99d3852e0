//! Console presentation - plain-text views of catalog, cart and form

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt::Write;

use crate::application::services::{CatalogView, FormController};
use crate::domain::entities::Cart;

/// Total as shown under the cart: `0` when empty, two decimals otherwise
pub fn format_total(cart: &Cart) -> String {
    if cart.is_empty() {
        return "0".to_string();
    }
    match cart.subtotal_total() {
        Ok(total) => format!("{:.2}", total),
        Err(e) => {
            tracing::warn!("Cannot total cart: {}", e);
            "n/a".to_string()
        }
    }
}

fn money(amount: Decimal) -> String {
    format!("${}", amount.normalize())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// The current catalog page with a pagination footer
pub fn render_catalog(view: &CatalogView) -> String {
    let mut out = String::new();
    let categories = view.categories();
    let tabs: Vec<String> = categories
        .iter()
        .map(|c| if c == view.selected_category() { format!("[{}]", c) } else { c.clone() })
        .collect();
    let _ = writeln!(out, "Categories: {}", tabs.join("  "));

    let visible = view.visible();
    if visible.is_empty() {
        let _ = writeln!(out, "(no products in '{}' on this page)", view.selected_category());
    }
    for product in visible {
        let _ = writeln!(out, "{:<26} {:<28} {:>8}", product.id, truncate(&product.name, 28), money(product.price));
        if !product.description.is_empty() {
            let _ = writeln!(out, "{:<26} {}", "", truncate(&product.description, 60));
        }
    }

    let pages = view.category_page_count().max(1);
    let _ = writeln!(out, "Page {}/{}", view.page_index() + 1, pages);
    out
}

/// Cart table: image, name, price, qty, subtotal, then the total
pub fn render_cart(cart: &Cart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<26} {:<24} {:>8} {:>4} {:>10}", "Id", "Name", "Price", "Qty", "Subtotal");
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{:<26} {:<24} {:>8} {:>4} {:>10}",
            line.id,
            truncate(&line.name, 24),
            money(line.price),
            line.quantity,
            money(line.total_price),
        );
    }
    let _ = writeln!(out, "Total: ${}", format_total(cart));
    out
}

/// Printable invoice: header with number and date, the cart table, item count
pub fn render_invoice(cart: &Cart, number: &str, issued_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "RADSHOP - Invoice {}", number);
    let _ = writeln!(out, "Issued {}", issued_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out, "{}", "-".repeat(76));
    out.push_str(&render_cart(cart));
    let _ = writeln!(out, "Items: {}", cart.item_count());
    out
}

/// The product form with the actions its mode allows
pub fn render_form(form: &FormController) -> String {
    let buffer = form.buffer();
    let mut out = String::new();
    let _ = writeln!(out, "Product form ({})", form.mode().as_str());
    let _ = writeln!(out, "  id:          {}", buffer.id);
    let _ = writeln!(out, "  name:        {}", buffer.name);
    let _ = writeln!(out, "  category:    {}", buffer.category);
    let _ = writeln!(out, "  image:       {}", buffer.image);
    let _ = writeln!(out, "  description: {}", buffer.description);
    let actions = match (form.can_add(), form.can_update()) {
        (true, false) => "add, reset",
        (false, true) => "update, reset",
        _ => "reset",
    };
    let _ = writeln!(out, "Actions: {}", actions);
    out
}
