//! Order Aggregate
//!
//! An [`Order`] is a snapshot of a cart taken at checkout. It copies the
//! cart's lines and totals and keeps no link back to the cart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use crate::domain::aggregates::cart::{CartItem, ShoppingCart};
use crate::domain::value_objects::PriceFormat;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    city: String,
    zip_code: String,
    country: String,
}

impl Address {
    pub fn new(street: impl Into<String>, city: impl Into<String>, zip_code: impl Into<String>, country: impl Into<String>) -> Self {
        Self { street: street.into(), city: city.into(), zip_code: zip_code.into(), country: country.into() }
    }

    pub fn street(&self) -> &str { &self.street }
    pub fn city(&self) -> &str { &self.city }
    pub fn zip_code(&self) -> &str { &self.zip_code }
    pub fn country(&self) -> &str { &self.country }

    /// Street, then "zip city", then country, one per line.
    pub fn formatted(&self) -> String { format!("{}\n{} {}\n{}", self.street, self.zip_code, self.city, self.country) }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.formatted()) }
}

#[derive(Clone, Debug, Serialize)]
pub struct Order {
    id: Uuid,
    items: Vec<CartItem>,
    discount_code: Option<String>,
    subtotal: Decimal,
    discount: Decimal,
    total: Decimal,
    created_at: DateTime<Utc>,
    shipping_address: Address,
}

impl Order {
    pub fn from_cart(cart: &ShoppingCart, shipping_address: Address) -> Self {
        let order = Self {
            id: Uuid::new_v4(),
            items: cart.items().to_vec(),
            discount_code: cart.discount_code().map(str::to_string),
            subtotal: cart.subtotal(),
            discount: cart.discount_amount(),
            total: cart.total(),
            created_at: Utc::now(),
            shipping_address,
        };
        tracing::info!(order_id = %order.id, cart_id = cart.id(), items = order.item_count(), total = %order.total, "order placed");
        order
    }

    pub fn id(&self) -> Uuid { self.id }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn discount_code(&self) -> Option<&str> { self.discount_code.as_deref() }
    pub fn subtotal(&self) -> Decimal { self.subtotal }
    pub fn discount_amount(&self) -> Decimal { self.discount }
    pub fn total(&self) -> Decimal { self.total }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn shipping_address(&self) -> &Address { &self.shipping_address }
    pub fn item_count(&self) -> u64 { self.items.iter().map(|i| u64::from(i.quantity())).sum() }

    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(self) }

    /// Plain-text receipt with amounts rendered through `format`.
    pub fn receipt(&self, format: &PriceFormat) -> String {
        let mut out = format!("Order {}\nPlaced {}\n\n", self.id, self.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
        for item in &self.items {
            out.push_str(&format!(
                "{} x {} @ {} = {}\n",
                item.quantity(),
                item.product().name(),
                format.format_or_plain(item.product().price()),
                format.format_or_plain(item.subtotal()),
            ));
        }
        out.push_str(&format!("\nSubtotal: {}\n", format.format_or_plain(self.subtotal)));
        if let Some(code) = &self.discount_code {
            out.push_str(&format!("Discount ({code}): -{}\n", format.format_or_plain(self.discount)));
        }
        out.push_str(&format!("Total: {}\n\nShip to:\n{}", format.format_or_plain(self.total), self.shipping_address));
        out
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.receipt(&PriceFormat::default())) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::cart::SharedCart;
    use crate::domain::aggregates::product::Product;
    use crate::domain::value_objects::Category;

    fn address() -> Address { Address::new("Satpayev 22", "Almaty", "050000", "Kazakhstan") }

    fn product(id: &str, cents: i64) -> Product {
        Product::create(id, format!("Product {id}"), Decimal::new(cents, 2), Category::Books, "").unwrap()
    }

    #[test]
    fn test_address_formatting() {
        let a = address();
        assert_eq!(a.formatted(), "Satpayev 22\n050000 Almaty\nKazakhstan");
        assert_eq!(a.to_string(), a.formatted());
    }

    #[test]
    fn test_order_snapshot_survives_clear() {
        let mut cart = ShoppingCart::new();
        cart.add_item(&product("A", 1000), 2);
        cart.add_item(&product("B", 500), 3);
        cart.set_discount_code(Some("SAVE10".into()));

        let order = Order::from_cart(&cart, address());
        let (subtotal, discount, total) = (order.subtotal(), order.discount_amount(), order.total());
        cart.clear_cart();

        assert_eq!(order.item_count(), 5);
        assert_eq!(cart.item_count(), 0);
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.subtotal(), subtotal);
        assert_eq!(order.discount_amount(), discount);
        assert_eq!(order.total(), total);
        assert_eq!(order.subtotal(), Decimal::new(3500, 2));
        assert_eq!(order.total(), Decimal::new(31500, 3));
    }

    #[test]
    fn test_order_unaffected_by_shared_cart_mutation() {
        let cart = SharedCart::new();
        cart.add_item(&product("A", 1000), 1);
        let order = cart.place_order(address());

        let alias = cart.clone();
        alias.add_item(&product("A", 1000), 4);
        alias.update_item_quantity("A", 9);
        alias.set_discount_code(Some("SAVE20".into()));
        alias.remove_item("A");

        assert_eq!(order.item_count(), 1);
        assert_eq!(order.items()[0].quantity(), 1);
        assert_eq!(order.discount_code(), None);
        assert_eq!(order.total(), Decimal::new(1000, 2));
        assert_eq!(order.shipping_address(), &address());
    }

    #[test]
    fn test_order_ids_unique() {
        let cart = ShoppingCart::new();
        let a = Order::from_cart(&cart, address());
        let b = Order::from_cart(&cart, address());
        assert_ne!(a.id(), b.id());
        assert!(a.created_at() <= b.created_at());
    }

    #[test]
    fn test_receipt_and_json() {
        let mut cart = ShoppingCart::new();
        cart.add_item(&product("A", 149999), 2);
        cart.set_discount_code(Some("save10".into()));
        let order = Order::from_cart(&cart, address());

        let receipt = order.to_string();
        assert!(receipt.contains("2 x Product A @ $1,499.99 = $2,999.98"));
        assert!(receipt.contains("Discount (save10): -$300.00"));
        assert!(receipt.contains("Total: $2,699.98"));
        assert!(receipt.ends_with("050000 Almaty\nKazakhstan"));

        let json: serde_json::Value = serde_json::from_str(&order.to_json().unwrap()).unwrap();
        assert_eq!(json["id"], order.id().to_string());
        assert_eq!(json["shipping_address"]["city"], "Almaty");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["product"]["category"], "books");
    }
}
