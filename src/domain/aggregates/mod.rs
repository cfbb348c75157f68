//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;

pub use product::{Product, ProductError, MAX_PRICE};
pub use order::{Order, Address};
pub use cart::{ShoppingCart, SharedCart, CartItem};
