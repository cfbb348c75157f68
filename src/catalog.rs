//! Product catalog keyed by product id.
//!
//! Catalog data may come from untrusted JSON, so records are validated one by
//! one: a bad record is rejected and reported, the rest still load.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use crate::domain::aggregates::{Product, ProductError};
use crate::domain::value_objects::Category;

/// Raw catalog entry as it appears in JSON.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub category: Category,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductError;

    fn try_from(r: ProductRecord) -> Result<Self, Self::Error> {
        Product::create(r.id, r.name, r.price, r.category, r.description)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

#[derive(Debug)]
pub struct RejectedRecord {
    pub id: String,
    pub reason: CatalogError,
}

/// Result of loading a catalog: what loaded and what did not.
#[derive(Debug)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub rejected: Vec<RejectedRecord>,
}

impl Catalog {
    pub fn new() -> Self { Self::default() }

    pub fn from_json(json: &str) -> Result<CatalogLoad, CatalogError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        let mut rejected = Vec::new();
        for record in records {
            let id = record.id.clone();
            let result = Product::try_from(record)
                .map_err(|source| CatalogError::InvalidProduct { id: id.clone(), source })
                .and_then(|product| catalog.insert(product));
            if let Err(reason) = result {
                tracing::warn!(product_id = %id, error = %reason, "rejected catalog record");
                rejected.push(RejectedRecord { id, reason });
            }
        }
        tracing::debug!(loaded = catalog.len(), rejected = rejected.len(), "catalog loaded");
        Ok(CatalogLoad { catalog, rejected })
    }

    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<CatalogLoad> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    pub fn insert(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.index.contains_key(product.id()) {
            return Err(CatalogError::DuplicateId(product.id().to_string()));
        }
        self.index.insert(product.id().to_string(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Product> { self.index.get(id).map(|&i| &self.products[i]) }

    /// Changes a product's catalog price. Carts hold their own copies and are
    /// not affected.
    pub fn update_price(&mut self, id: &str, price: Decimal) -> crate::Result<()> {
        let idx = *self.index.get(id).ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        self.products[idx].update_price(price)?;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> { self.products.iter() }
    pub fn len(&self) -> usize { self.products.len() }
    pub fn is_empty(&self) -> bool { self.products.is_empty() }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate product id {0}")]
    DuplicateId(String),

    #[error("Product {0} not found")]
    NotFound(String),

    #[error("Invalid product {id}: {source}")]
    InvalidProduct { id: String, source: ProductError },
}
