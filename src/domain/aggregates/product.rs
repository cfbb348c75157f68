//! Product Aggregate

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use crate::domain::value_objects::{Category, PriceFormat};

/// Highest accepted unit price. Keeps `price * u32::MAX` summed over any
/// realistic number of cart lines well inside `Decimal`'s range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Product {
    id: String,
    name: String,
    price: Decimal,
    category: Category,
    description: String,
}

impl Product {
    /// Builds a product, rejecting prices outside `(0, MAX_PRICE]`.
    pub fn create(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        category: Category,
        description: impl Into<String>,
    ) -> Result<Self, ProductError> {
        validate_price(price)?;
        Ok(Self { id: id.into(), name: name.into(), price, category, description: description.into() })
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn price(&self) -> Decimal { self.price }
    pub fn category(&self) -> Category { self.category }
    pub fn description(&self) -> &str { &self.description }

    /// Price in the default display format.
    pub fn display_price(&self) -> String { self.display_price_with(&PriceFormat::default()) }

    pub fn display_price_with(&self, format: &PriceFormat) -> String { format.format_or_plain(self.price) }

    pub fn update_price(&mut self, new_price: Decimal) -> Result<(), ProductError> {
        validate_price(new_price)?;
        self.price = new_price;
        Ok(())
    }
}

fn validate_price(price: Decimal) -> Result<(), ProductError> {
    if price <= Decimal::ZERO || price > MAX_PRICE {
        return Err(ProductError::InvalidPrice(price));
    }
    Ok(())
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    #[error("Invalid price {0}: must be greater than zero and at most 1000000000")]
    InvalidPrice(Decimal),
}
