//! OpenSASE Cart
//!
//! In-memory shopping cart and order snapshot model.
//!
//! ## Features
//! - Product catalog with price validation
//! - Shopping cart with merge-on-add and discount codes
//! - Shared cart handles (every holder sees every mutation)
//! - Immutable order snapshots decoupled from the cart
//! - Locale-aware price display

pub mod catalog;
pub mod config;
pub mod domain;

pub use catalog::{Catalog, CatalogError, CatalogLoad, ProductRecord, RejectedRecord};
pub use config::{ConfigError, ShopConfig};
pub use domain::aggregates::{
    Address, CartItem, Order, Product, ProductError, SharedCart, ShoppingCart, MAX_PRICE,
};
pub use domain::value_objects::{Category, PriceFormat, SymbolPosition};

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum ShopError {
    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShopError>;
