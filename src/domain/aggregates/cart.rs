//! Cart Aggregate
//!
//! [`ShoppingCart`] owns its items and is mutated in place. [`SharedCart`] is
//! a cloneable handle to one cart: every clone observes every mutation.
//!
//! Quantities must be positive. A zero quantity is a caller bug, not bad
//! input, and panics before the cart is touched.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;
use crate::domain::aggregates::order::{Address, Order};
use crate::domain::aggregates::product::Product;
use crate::domain::value_objects::discount_percent;

/// One product line in a cart. Cloning yields an independent quantity.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CartItem {
    product: Product,
    quantity: u32,
}

impl CartItem {
    /// # Panics
    /// If `quantity` is zero.
    pub fn new(product: Product, quantity: u32) -> Self {
        assert!(quantity > 0, "cart item quantity must be greater than zero");
        Self { product, quantity }
    }

    pub fn product(&self) -> &Product { &self.product }
    pub fn quantity(&self) -> u32 { self.quantity }
    pub fn subtotal(&self) -> Decimal { self.product.price().saturating_mul(Decimal::from(self.quantity)) }

    /// # Panics
    /// If `quantity` is zero.
    pub fn set_quantity(&mut self, quantity: u32) {
        assert!(quantity > 0, "cart item quantity must be greater than zero");
        self.quantity = quantity;
    }

    /// # Panics
    /// If `by` is zero, or the new quantity does not fit in a `u32`.
    pub fn increase_quantity(&mut self, by: u32) {
        assert!(by > 0, "quantity increase must be greater than zero");
        self.quantity = match self.quantity.checked_add(by) {
            Some(quantity) => quantity,
            None => panic!("cart item quantity overflow: {} + {by}", self.quantity),
        };
    }
}

#[derive(Clone, Debug)]
pub struct ShoppingCart {
    id: String,
    items: Vec<CartItem>,
    discount_code: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ShoppingCart {
    pub fn new() -> Self {
        let now = Utc::now();
        Self { id: Uuid::new_v4().to_string(), items: vec![], discount_code: None, created_at: now, updated_at: now }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn item(&self, product_id: &str) -> Option<&CartItem> { self.items.iter().find(|i| i.product.id() == product_id) }
    pub fn discount_code(&self) -> Option<&str> { self.discount_code.as_deref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Units across all lines, not distinct products.
    pub fn item_count(&self) -> u64 { self.items.iter().map(|i| u64::from(i.quantity)).sum() }

    /// Saturates at `Decimal::MAX`, which capped product prices keep out of reach.
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn discount_amount(&self) -> Decimal {
        match self.discount_code.as_deref().and_then(discount_percent) {
            Some(pct) => self.subtotal().saturating_mul(pct) / Decimal::ONE_HUNDRED,
            None => Decimal::ZERO,
        }
    }

    pub fn total(&self) -> Decimal { (self.subtotal() - self.discount_amount()).max(Decimal::ZERO) }

    pub fn set_discount_code(&mut self, code: Option<String>) {
        if let Some(code) = code.as_deref() {
            if discount_percent(code).is_none() {
                tracing::debug!(cart_id = %self.id, code, "unrecognised discount code, no discount applies");
            }
        }
        self.discount_code = code;
        self.touch();
    }

    /// Adds `quantity` units of `product`, merging into an existing line for
    /// the same product id.
    ///
    /// # Panics
    /// If `quantity` is zero, or the merged quantity overflows a `u32`.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        assert!(quantity > 0, "quantity added to cart must be greater than zero");
        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id() == product.id()) {
            existing.increase_quantity(quantity);
            tracing::debug!(cart_id = %self.id, product_id = product.id(), quantity = existing.quantity, "merged into existing line");
        } else {
            self.items.push(CartItem::new(product.clone(), quantity));
            tracing::debug!(cart_id = %self.id, product_id = product.id(), quantity, "added line");
        }
        self.touch();
    }

    /// Sets the quantity of an existing line. Unknown ids are ignored.
    ///
    /// # Panics
    /// If `quantity` is zero, whether or not the product is in the cart.
    pub fn update_item_quantity(&mut self, product_id: &str, quantity: u32) {
        assert!(quantity > 0, "cart item quantity must be greater than zero");
        match self.items.iter_mut().find(|i| i.product.id() == product_id) {
            Some(item) => {
                item.set_quantity(quantity);
                self.touch();
            }
            None => tracing::debug!(cart_id = %self.id, product_id, "quantity update for product not in cart"),
        }
    }

    /// Removes the line for `product_id` if present.
    pub fn remove_item(&mut self, product_id: &str) {
        match self.items.iter().position(|i| i.product.id() == product_id) {
            Some(idx) => {
                self.items.remove(idx);
                self.touch();
            }
            None => tracing::debug!(cart_id = %self.id, product_id, "remove for product not in cart"),
        }
    }

    /// Empties the cart. The discount code is kept.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.touch();
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

impl Default for ShoppingCart {
    fn default() -> Self { Self::new() }
}

/// Shared handle to a single [`ShoppingCart`]. Clones alias the same cart.
#[derive(Clone, Debug, Default)]
pub struct SharedCart(Rc<RefCell<ShoppingCart>>);

impl SharedCart {
    pub fn new() -> Self { Self::default() }

    /// Whether both handles point at the same cart.
    pub fn ptr_eq(&self, other: &SharedCart) -> bool { Rc::ptr_eq(&self.0, &other.0) }

    /// Runs `f` against the current cart state.
    pub fn read<R>(&self, f: impl FnOnce(&ShoppingCart) -> R) -> R { f(&*self.0.borrow()) }

    /// Independent copy of the current state.
    pub fn snapshot(&self) -> ShoppingCart { self.0.borrow().clone() }

    pub fn id(&self) -> String { self.read(|c| c.id().to_string()) }
    pub fn items(&self) -> Vec<CartItem> { self.read(|c| c.items().to_vec()) }
    pub fn discount_code(&self) -> Option<String> { self.read(|c| c.discount_code().map(str::to_string)) }
    pub fn subtotal(&self) -> Decimal { self.read(ShoppingCart::subtotal) }
    pub fn discount_amount(&self) -> Decimal { self.read(ShoppingCart::discount_amount) }
    pub fn total(&self) -> Decimal { self.read(ShoppingCart::total) }
    pub fn item_count(&self) -> u64 { self.read(ShoppingCart::item_count) }
    pub fn is_empty(&self) -> bool { self.read(ShoppingCart::is_empty) }

    pub fn set_discount_code(&self, code: Option<String>) { self.0.borrow_mut().set_discount_code(code) }

    /// See [`ShoppingCart::add_item`]. A panic releases the borrow on unwind.
    pub fn add_item(&self, product: &Product, quantity: u32) { self.0.borrow_mut().add_item(product, quantity) }

    /// See [`ShoppingCart::update_item_quantity`].
    pub fn update_item_quantity(&self, product_id: &str, quantity: u32) {
        self.0.borrow_mut().update_item_quantity(product_id, quantity)
    }

    pub fn remove_item(&self, product_id: &str) { self.0.borrow_mut().remove_item(product_id) }
    pub fn clear_cart(&self) { self.0.borrow_mut().clear_cart() }

    /// Snapshots the cart into an [`Order`]. The cart itself is left as is.
    pub fn place_order(&self, shipping_address: Address) -> Order { Order::from_cart(&*self.0.borrow(), shipping_address) }
}

impl From<ShoppingCart> for SharedCart {
    fn from(cart: ShoppingCart) -> Self { Self(Rc::new(RefCell::new(cart))) }
}
