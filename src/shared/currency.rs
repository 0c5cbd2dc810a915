//! Currency vocabulary shared by charities, donations and certificates.
//!
//! Amounts are carried as integer minor units (cents) everywhere; this module
//! only renders them for display and export.

use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Supported currencies, matching the `currency_code` database enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "currency_code")]
pub enum Currency {
    USD,
    ZAR,
    GBP,
    EUR,
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::USD => write!(f, "USD"),
            Currency::ZAR => write!(f, "ZAR"),
            Currency::GBP => write!(f, "GBP"),
            Currency::EUR => write!(f, "EUR"),
        }
    }
}

impl Currency {
    /// Symbol used when rendering amounts, e.g. "R2,346.00".
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::ZAR => "R",
            Currency::GBP => "£",
            Currency::EUR => "€",
        }
    }

    /// Human-readable currency name
    #[allow(dead_code)]
    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::ZAR => "South African Rand",
            Currency::GBP => "British Pound",
            Currency::EUR => "Euro",
        }
    }

    /// Parse a currency code; unknown codes fall back to USD
    pub fn from_code(code: &str) -> Currency {
        match code {
            "ZAR" => Currency::ZAR,
            "GBP" => Currency::GBP,
            "EUR" => Currency::EUR,
            _ => Currency::USD,
        }
    }
}

/// Format a minor-unit amount with its currency symbol, two decimals and
/// thousands separators: `format_amount(234_600, Currency::ZAR)` is
/// `"R2,346.00"`. Amounts are expected to be non-negative.
pub fn format_amount(cents: i64, currency: Currency) -> String {
    let whole = cents / 100;
    let fraction = cents % 100;
    format!(
        "{}{}.{:02}",
        currency.symbol(),
        group_thousands(whole),
        fraction
    )
}

fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(Currency::USD.symbol(), "$");
        assert_eq!(Currency::ZAR.symbol(), "R");
        assert_eq!(Currency::GBP.symbol(), "£");
        assert_eq!(Currency::EUR.symbol(), "€");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Currency::ZAR.display_name(), "South African Rand");
        assert_eq!(Currency::USD.display_name(), "US Dollar");
    }

    #[test]
    fn test_unknown_code_falls_back_to_usd() {
        assert_eq!(Currency::from_code("JPY"), Currency::USD);
        assert_eq!(Currency::from_code(""), Currency::USD);
        assert_eq!(Currency::from_code("ZAR"), Currency::ZAR);
    }

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(234_600, Currency::ZAR), "R2,346.00");
        assert_eq!(format_amount(123_450, Currency::USD), "$1,234.50");
        assert_eq!(format_amount(100_000_000, Currency::EUR), "€1,000,000.00");
    }

    #[test]
    fn test_format_amount_small_values() {
        assert_eq!(format_amount(0, Currency::GBP), "£0.00");
        assert_eq!(format_amount(5, Currency::USD), "$0.05");
        assert_eq!(format_amount(2500, Currency::USD), "$25.00");
        assert_eq!(format_amount(99_999, Currency::USD), "$999.99");
    }
}
