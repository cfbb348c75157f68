//! OpenSASE Cart - walks through a shopping session end to end

use anyhow::Result;
use opensase_cart::{Address, CartItem, Catalog, CatalogLoad, Order, SharedCart, ShopConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE_CATALOG: &str = r#"[
    {"id": "p1", "name": "Macbook Pro 14", "price": "1499.99", "category": "electronics", "description": "Powerful laptop"},
    {"id": "p2", "name": "Little Prince", "price": "29.99", "category": "books", "description": "Fairy tale"},
    {"id": "p3", "name": "Headphones", "price": "99.90", "category": "electronics", "description": "Wireless"}
]"#;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = ShopConfig::from_env()?;
    let CatalogLoad { catalog, rejected } = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::from_json(SAMPLE_CATALOG)?,
    };
    tracing::info!(locale = %config.locale, products = catalog.len(), rejected = rejected.len(), "catalog ready");
    for product in catalog.iter() {
        tracing::info!(id = product.id(), name = product.name(), category = %product.category(), price = %product.display_price_with(&config.price_format), "product");
    }

    let laptop = catalog.get("p1").ok_or_else(|| anyhow::anyhow!("catalog has no product p1"))?;
    let book = catalog.get("p2").ok_or_else(|| anyhow::anyhow!("catalog has no product p2"))?;
    let headphones = catalog.get("p3").ok_or_else(|| anyhow::anyhow!("catalog has no product p3"))?;
    let fmt = |amount| config.price_format.format_or_plain(amount);

    let cart = SharedCart::new();
    cart.add_item(laptop, 1);
    cart.add_item(book, 2);
    cart.add_item(laptop, 1);
    tracing::info!(subtotal = %fmt(cart.subtotal()), item_count = cart.item_count(), "cart filled");

    cart.set_discount_code(Some("SAVE10".to_string()));
    tracing::info!(discount = %fmt(cart.discount_amount()), total = %fmt(cart.total()), "discount applied");

    cart.remove_item(book.id());

    let modify_cart = |c: &SharedCart| c.add_item(headphones, 1);
    modify_cart(&cart.clone());
    tracing::info!(item_count = cart.item_count(), "after modify_cart through an aliased handle");

    let item1 = CartItem::new(laptop.clone(), 1);
    let mut item2 = item1.clone();
    item2.set_quantity(5);
    tracing::info!(item1 = item1.quantity(), item2 = item2.quantity(), "copied cart item mutated independently");

    let address = Address::new("Satpayev 22", "Almaty", "050000", "Kazakhstan");
    let order: Order = cart.place_order(address);
    cart.clear_cart();
    tracing::info!(order_items = order.item_count(), cart_items = cart.item_count(), "cart cleared after checkout");

    println!("{}", order.receipt(&config.price_format));
    Ok(())
}
