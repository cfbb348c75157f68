//! Configuration loaded from the environment

use std::path::PathBuf;
use thiserror::Error;
use crate::domain::value_objects::PriceFormat;

const DEFAULT_LOCALE: &str = "en-US";

#[derive(Clone, Debug)]
pub struct ShopConfig {
    pub locale: String,
    pub price_format: PriceFormat,
    pub catalog_path: Option<PathBuf>,
}

impl ShopConfig {
    /// Reads `SHOP_LOCALE` and `SHOP_CATALOG_PATH` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|key| std::env::var(key).ok()) }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let locale = lookup("SHOP_LOCALE").filter(|v| !v.trim().is_empty()).unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let price_format = PriceFormat::for_locale(&locale).ok_or_else(|| ConfigError::UnknownLocale(locale.clone()))?;
        let catalog_path = lookup("SHOP_CATALOG_PATH").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Ok(Self { locale, price_format, catalog_path })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown locale {0:?}")]
    UnknownLocale(String),
}
