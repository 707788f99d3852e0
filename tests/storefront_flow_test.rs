//! Storefront flow integration tests
//! Run with: cargo test --test storefront_flow_test

use std::sync::{Arc, Once};

use rust_decimal::Decimal;

use radshop::application::services::cart_service::CART_KEY;
use radshop::application::services::catalog_service::{self, DEFAULT_PAGE_SIZE};
use radshop::application::services::{CartLedger, CatalogView, FormController, Storefront};
use radshop::domain::entities::Product;
use radshop::domain::traits::Store;
use radshop::infrastructure::api::MemoryProductApi;
use radshop::infrastructure::database::SqliteStore;
use radshop::infrastructure::storage::MemoryStore;

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// 10 products: 5 entrées then 5 plats, interleaved ids
fn menu() -> Vec<Product> {
    (0..10)
        .map(|i| {
            let category = if i % 2 == 0 { "Entrée" } else { "Plat" };
            Product::new(format!("p{}", i), format!("Dish {}", i), category, Decimal::new(300 + i as i64, 2))
        })
        .collect()
}

fn storefront(api: Arc<MemoryProductApi>, store: Arc<dyn Store>) -> Storefront {
    Storefront::new(
        api,
        CatalogView::new("Entrée", DEFAULT_PAGE_SIZE),
        CartLedger::new(store, CART_KEY),
        FormController::default(),
    )
}

#[tokio::test]
async fn test_browse_add_increment_remove() {
    ensure_init();

    let api = Arc::new(MemoryProductApi::new(menu()));
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let mut shop = storefront(api, store.clone());

    assert_eq!(shop.refresh().await.unwrap(), 10);
    assert_eq!(shop.catalog().categories(), vec!["Entrée".to_string(), "Plat".to_string()]);

    shop.catalog_mut().select_category("Entrée");
    let visible: Vec<String> = shop.catalog().visible().iter().map(|p| p.id.clone()).collect();
    assert_eq!(visible, vec!["p0", "p2", "p4", "p6", "p8"]);
    assert_eq!(shop.catalog().page_count(), 2);
    assert_eq!(shop.catalog().category_page_count(), 1);

    // p0 costs 3.00
    shop.add_to_cart("p0").await.unwrap();
    assert_eq!(shop.cart().cart().len(), 1);
    assert_eq!(shop.cart().subtotal_total().unwrap(), Decimal::new(300, 2));

    shop.increment("p0").await.unwrap();
    shop.increment("p0").await.unwrap();
    let line = shop.cart().cart().get("p0").unwrap();
    assert_eq!(line.quantity, 3);
    assert_eq!(shop.cart().subtotal_total().unwrap(), Decimal::new(900, 2));

    assert!(shop.remove_from_cart("p0").await.unwrap());
    assert!(shop.cart().cart().is_empty());
    assert_eq!(shop.cart().subtotal_total().unwrap(), Decimal::ZERO);
    assert_eq!(store.get(CART_KEY).await.unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_cart_survives_restart_on_sqlite() {
    ensure_init();

    let api = Arc::new(MemoryProductApi::new(menu()));
    let store: Arc<dyn Store> = Arc::new(SqliteStore::in_memory().unwrap());

    {
        let mut shop = storefront(api.clone(), store.clone());
        shop.refresh().await.unwrap();
        shop.add_to_cart("p1").await.unwrap();
        shop.add_to_cart("p3").await.unwrap();
        shop.add_to_cart("p1").await.unwrap();
        shop.decrement("p3").await.unwrap();
    }

    let ledger = CartLedger::load(store, CART_KEY).await.unwrap();
    let cart = ledger.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get("p1").unwrap().quantity, 2);
    assert_eq!(ledger.subtotal_total().unwrap(), Decimal::new(602, 2));
}

#[tokio::test]
async fn test_admin_edit_cycle() {
    ensure_init();

    let api = Arc::new(MemoryProductApi::new(menu()));
    let mut shop = storefront(api.clone(), Arc::new(MemoryStore::new()));
    shop.refresh().await.unwrap();

    shop.edit("p2").unwrap();
    assert!(shop.form().can_update());
    shop.form_mut().set_name("Soupe à l'oignon");
    shop.update_product().await.unwrap();

    assert!(shop.form().can_add());
    assert_eq!(shop.catalog().find("p2").unwrap().name, "Soupe à l'oignon");

    shop.delete_product("p2").await.unwrap();
    assert!(shop.catalog().find("p2").is_none());
    assert!(catalog_service::page(shop.catalog().products(), "Entrée", 0, DEFAULT_PAGE_SIZE)
        .iter()
        .all(|p| p.id != "p2"));
}
