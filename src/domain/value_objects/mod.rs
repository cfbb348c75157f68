//! Value Objects for the cart domain

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category, a closed set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Books,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Electronics => write!(f, "electronics"),
            Self::Clothing => write!(f, "clothing"),
            Self::Food => write!(f, "food"),
            Self::Books => write!(f, "books"),
        }
    }
}

// =============================================================================
// Discount codes
// =============================================================================

/// Recognised discount codes and their percentage off the subtotal.
const DISCOUNT_CODES: &[(&str, u32)] = &[("SAVE10", 10), ("SAVE20", 20)];

/// Percentage off for `code`, matched case-insensitively.
/// Unknown codes yield `None`.
pub fn discount_percent(code: &str) -> Option<Decimal> {
    let code = code.to_uppercase();
    DISCOUNT_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, pct)| Decimal::from(*pct))
}

// =============================================================================
// Price display
// =============================================================================

/// Largest scale a `Decimal` can carry.
const MAX_FRACTION_DIGITS: u32 = 28;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// How a monetary amount is rendered for display.
///
/// Presets exist for a handful of locales (see [`PriceFormat::for_locale`]);
/// anything else can be built with [`PriceFormat::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceFormat {
    symbol: String,
    position: SymbolPosition,
    decimal_separator: char,
    group_separator: Option<char>,
    fraction_digits: u32,
}

impl PriceFormat {
    pub fn new(
        symbol: impl Into<String>,
        position: SymbolPosition,
        decimal_separator: char,
        group_separator: Option<char>,
        fraction_digits: u32,
    ) -> Self {
        Self { symbol: symbol.into(), position, decimal_separator, group_separator, fraction_digits }
    }

    /// Preset for a locale tag such as `en-US` or `de_DE`.
    pub fn for_locale(tag: &str) -> Option<Self> {
        use SymbolPosition::*;
        let tag = tag.trim().replace('_', "-").to_ascii_lowercase();
        let format = match tag.as_str() {
            "en-us" => Self::new("$", Prefix, '.', Some(','), 2),
            "en-gb" => Self::new("£", Prefix, '.', Some(','), 2),
            "de-de" => Self::new("€", Suffix, ',', Some('.'), 2),
            "fr-fr" => Self::new("€", Suffix, ',', Some('\u{202f}'), 2),
            "ru-ru" => Self::new("₽", Suffix, ',', Some('\u{a0}'), 2),
            "kk-kz" => Self::new("₸", Suffix, ',', Some('\u{a0}'), 2),
            _ => return None,
        };
        Some(format)
    }

    pub fn symbol(&self) -> &str { &self.symbol }
    pub fn fraction_digits(&self) -> u32 { self.fraction_digits }

    /// Renders `amount`, or `None` when it cannot be represented with the
    /// configured number of fraction digits.
    pub fn format(&self, amount: Decimal) -> Option<String> {
        if self.fraction_digits > MAX_FRACTION_DIGITS {
            return None;
        }
        let mut rounded = amount
            .round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero)
            .abs();
        rounded.rescale(self.fraction_digits);
        if rounded.scale() != self.fraction_digits {
            return None;
        }

        let plain = rounded.to_string();
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (plain.as_str(), None),
        };

        let mut number = match self.group_separator {
            Some(sep) => group_digits(int_part, sep),
            None => int_part.to_string(),
        };
        if let Some(frac_part) = frac_part {
            number.push(self.decimal_separator);
            number.push_str(frac_part);
        }

        let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        Some(match self.position {
            SymbolPosition::Prefix => format!("{sign}{}{number}", self.symbol),
            SymbolPosition::Suffix => format!("{sign}{number}\u{a0}{}", self.symbol),
        })
    }

    /// Like [`PriceFormat::format`], falling back to the plain decimal string.
    pub fn format_or_plain(&self, amount: Decimal) -> String {
        self.format(amount).unwrap_or_else(|| amount.to_string())
    }
}

impl Default for PriceFormat {
    fn default() -> Self { Self::new("$", SymbolPosition::Prefix, '.', Some(','), 2) }
}

fn group_digits(digits: &str, sep: char) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_lookup_ignores_case() {
        assert_eq!(discount_percent("SAVE10"), Some(Decimal::new(10, 0)));
        assert_eq!(discount_percent("save10"), discount_percent("SAVE10"));
        assert_eq!(discount_percent("Save20"), Some(Decimal::new(20, 0)));
        assert_eq!(discount_percent("SAVE30"), None);
        assert_eq!(discount_percent(""), None);
    }

    #[test]
    fn test_padded_code_is_not_recognised() {
        assert_eq!(discount_percent(" SAVE10 "), None);
        assert_eq!(discount_percent("SAVE20\n"), None);
    }

    #[test]
    fn test_default_format() {
        let f = PriceFormat::default();
        assert_eq!(f.format(Decimal::new(149999, 2)).unwrap(), "$1,499.99");
        assert_eq!(f.format(Decimal::new(2999, 2)).unwrap(), "$29.99");
        assert_eq!(f.format(Decimal::new(1234567, 0)).unwrap(), "$1,234,567.00");
        assert_eq!(f.format(Decimal::new(5, 3)).unwrap(), "$0.01");
    }

    #[test]
    fn test_suffix_locale() {
        let f = PriceFormat::for_locale("de_DE").unwrap();
        assert_eq!(f.format(Decimal::new(149999, 2)).unwrap(), "1.499,99\u{a0}€");
        assert_eq!(f.format(Decimal::new(-250, 2)).unwrap(), "-2,50\u{a0}€");
    }

    #[test]
    fn test_unknown_locale() {
        assert!(PriceFormat::for_locale("xx-YY").is_none());
        assert!(PriceFormat::for_locale("EN-us").is_some());
    }

    #[test]
    fn test_unrenderable_falls_back_to_plain() {
        let f = PriceFormat::new("$", SymbolPosition::Prefix, '.', None, 40);
        let amount = Decimal::new(1999, 2);
        assert!(f.format(amount).is_none());
        assert_eq!(f.format_or_plain(amount), "19.99");
    }

    #[test]
    fn test_zero_fraction_digits() {
        let f = PriceFormat::new("¥", SymbolPosition::Prefix, '.', Some(','), 0);
        assert_eq!(f.format(Decimal::new(123456, 1)).unwrap(), "¥12,346");
    }

    #[test]
    fn test_category_serde() {
        assert_eq!(serde_json::to_string(&Category::Books).unwrap(), "\"books\"");
        let c: Category = serde_json::from_str("\"electronics\"").unwrap();
        assert_eq!(c, Category::Electronics);
    }
}
