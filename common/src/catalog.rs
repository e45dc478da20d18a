//! Fixed currency catalog.

use serde::{Deserialize, Serialize};

use crate::monetary::Currency;

/// A currency available for selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// ISO 4217 code.
    pub code: Currency,
    /// Display name.
    pub name: String,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Optional display symbol. Currencies without a widely recognized
    /// symbol fall back to code-prefixed formatting.
    pub symbol: Option<String>,
}

impl CurrencyInfo {
    /// Create a new catalog entry.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: Option<&str>,
        symbol: Option<&str>,
    ) -> Self {
        Self {
            code: Currency::new(code),
            name: name.into(),
            description: description.map(String::from),
            symbol: symbol.map(String::from),
        }
    }
}

/// The fixed, ordered list of known currencies.
///
/// Defined once at startup and injected into the widget; the order is the
/// selection order presented to the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CurrencyInfo>,
}

impl Catalog {
    /// Create a catalog from entries.
    pub fn new(entries: Vec<CurrencyInfo>) -> Self {
        Self { entries }
    }

    /// Look up an entry by currency.
    pub fn get(&self, currency: &Currency) -> Option<&CurrencyInfo> {
        self.entries.iter().find(|e| &e.code == currency)
    }

    /// Check whether a currency is in the catalog.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.get(currency).is_some()
    }

    /// Iterate entries in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyInfo> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The built-in demo catalog.
    pub fn builtin() -> Self {
        Self::new(vec![
            CurrencyInfo::new("PKR", "Pakistani Rupee", Some("Currency of Pakistan"), Some("₨")),
            CurrencyInfo::new("USD", "US Dollar", Some("Currency of the United States"), Some("$")),
            CurrencyInfo::new("EUR", "Euro", Some("Currency used by the European Union"), Some("€")),
            CurrencyInfo::new("GBP", "British Pound", Some("Currency of the United Kingdom"), Some("£")),
            CurrencyInfo::new("JPY", "Japanese Yen", Some("Currency of Japan"), Some("¥")),
            CurrencyInfo::new("CAD", "Canadian Dollar", Some("Currency of Canada"), Some("CA$")),
            CurrencyInfo::new("AUD", "Australian Dollar", Some("Currency of Australia"), Some("A$")),
            CurrencyInfo::new("INR", "Indian Rupee", Some("Currency of India"), Some("₹")),
            CurrencyInfo::new("CNY", "Chinese Yuan", Some("Currency of China"), Some("CN¥")),
            CurrencyInfo::new("AED", "Emirati Dirham", Some("Currency of the United Arab Emirates"), None),
            CurrencyInfo::new("SAR", "Saudi Riyal", Some("Currency of Saudi Arabia"), None),
            CurrencyInfo::new("CHF", "Swiss Franc", Some("Currency of Switzerland"), None),
            CurrencyInfo::new("ZAR", "South African Rand", Some("Currency of South Africa"), Some("R")),
            CurrencyInfo::new("BRL", "Brazilian Real", Some("Currency of Brazil"), Some("R$")),
            CurrencyInfo::new("RUB", "Russian Ruble", Some("Currency of Russia"), Some("₽")),
            CurrencyInfo::new("TRY", "Turkish Lira", Some("Currency of Turkey"), Some("₺")),
            CurrencyInfo::new("KRW", "South Korean Won", Some("Currency of South Korea"), Some("₩")),
            CurrencyInfo::new("NGN", "Nigerian Naira", Some("Currency of Nigeria"), Some("₦")),
            CurrencyInfo::new("MXN", "Mexican Peso", Some("Currency of Mexico"), Some("MX$")),
            CurrencyInfo::new("THB", "Thai Baht", Some("Currency of Thailand"), Some("฿")),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.len(), 20);

        let usd = catalog.get(&Currency::usd()).unwrap();
        assert_eq!(usd.name, "US Dollar");
        assert_eq!(usd.symbol.as_deref(), Some("$"));
        assert_eq!(
            usd.description.as_deref(),
            Some("Currency of the United States")
        );
    }

    #[test]
    fn test_selection_order_preserved() {
        let catalog = Catalog::builtin();
        let first = catalog.iter().next().unwrap();

        assert_eq!(first.code.code(), "PKR");
    }

    #[test]
    fn test_unknown_currency() {
        let catalog = Catalog::builtin();

        assert!(!catalog.contains(&Currency::new("XYZ")));
        assert!(catalog.get(&Currency::new("XYZ")).is_none());
    }

    #[test]
    fn test_entry_without_symbol() {
        let catalog = Catalog::builtin();
        let chf = catalog.get(&Currency::new("CHF")).unwrap();

        assert!(chf.symbol.is_none());
    }
}
