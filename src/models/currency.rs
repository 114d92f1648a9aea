//! Currency table for display-time conversion.
//!
//! All amounts inside the engine are stored in the base currency. Other
//! currencies are display-time conversions: a pure multiplication by the
//! entry's conversion rate, with no rounding beyond display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single currency entry in the conversion table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO-like currency code (e.g., "NZD").
    pub code: String,
    /// Display symbol (e.g., "$", "£").
    pub symbol: String,
    /// Human-readable currency name.
    pub display_name: String,
    /// Units of this currency per one unit of the base currency.
    pub conversion_rate: Decimal,
    /// Whether this currency is shown in converted totals.
    pub enabled: bool,
}

/// An ordered currency table with a single base currency.
///
/// Entry order is table order and is preserved in enabled-currency listings
/// and converted quote totals. Operations on unknown codes are silent no-ops;
/// conversion through an unknown code returns the amount unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyTable {
    base_currency: String,
    entries: Vec<Currency>,
}

impl CurrencyTable {
    /// Creates a table from a base currency code and ordered entries.
    pub fn new(base_currency: impl Into<String>, entries: Vec<Currency>) -> Self {
        Self {
            base_currency: base_currency.into(),
            entries,
        }
    }

    /// Returns the built-in table: NZD base plus USD, AUD, GBP, and EUR.
    pub fn builtin() -> Self {
        fn entry(
            code: &str,
            symbol: &str,
            display_name: &str,
            rate: &str,
            enabled: bool,
        ) -> Currency {
            Currency {
                code: code.to_string(),
                symbol: symbol.to_string(),
                display_name: display_name.to_string(),
                conversion_rate: rate.parse().unwrap_or(Decimal::ONE),
                enabled,
            }
        }

        Self::new(
            "NZD",
            vec![
                entry("NZD", "$", "New Zealand Dollar", "1.0", true),
                entry("USD", "$", "US Dollar", "0.62", false),
                entry("AUD", "$", "Australian Dollar", "0.94", false),
                entry("GBP", "£", "British Pound", "0.48", false),
                entry("EUR", "€", "Euro", "0.56", false),
            ],
        )
    }

    /// Returns the base currency code.
    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Sets the base currency. No-op if the code is not in the table.
    pub fn set_base_currency(&mut self, code: &str) {
        if self.get(code).is_some() {
            self.base_currency = code.to_string();
        }
    }

    /// Returns all entries in table order.
    pub fn entries(&self) -> &[Currency] {
        &self.entries
    }

    /// Looks up an entry by code.
    pub fn get(&self, code: &str) -> Option<&Currency> {
        self.entries.iter().find(|c| c.code == code)
    }

    /// Sets the conversion rate for a currency. No-op if the code is unknown.
    pub fn set_rate(&mut self, code: &str, rate: Decimal) {
        if let Some(currency) = self.entries.iter_mut().find(|c| c.code == code) {
            currency.conversion_rate = rate;
        }
    }

    /// Enables or disables a currency. No-op if the code is unknown.
    pub fn toggle(&mut self, code: &str, enabled: bool) {
        if let Some(currency) = self.entries.iter_mut().find(|c| c.code == code) {
            currency.enabled = enabled;
        }
    }

    /// Converts a base-currency amount into the given currency.
    ///
    /// Returns the amount unchanged when the code is unknown. This is a
    /// fallback, not an error.
    pub fn convert(&self, amount: Decimal, code: &str) -> Decimal {
        match self.get(code) {
            Some(currency) => amount * currency.conversion_rate,
            None => amount,
        }
    }

    /// Returns enabled entries in table order.
    pub fn enabled(&self) -> Vec<&Currency> {
        self.entries.iter().filter(|c| c.enabled).collect()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::builtin()
    }
}
