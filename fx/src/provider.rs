//! Rate provider seam and the static table implementation.

use async_trait::async_trait;
use cambio_common::{Currency, CurrencyPair, Rate};
use dashmap::DashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::error::{FxError, FxResult};

/// Trait for exchange rate sources.
///
/// The widget and engine only see this seam; the static table below can be
/// swapped for a live source without touching conversion logic.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Get the rate for an ordered currency pair.
    async fn get_rate(&self, pair: &CurrencyPair) -> FxResult<Rate>;

    /// Check if this provider has an entry for the given pair.
    fn supports_pair(&self, pair: &CurrencyPair) -> bool;

    /// Get all pairs this provider has entries for.
    fn supported_pairs(&self) -> Vec<CurrencyPair>;
}

/// A fixed, partially-populated rate table.
///
/// Entries are directional: the presence of a pair says nothing about its
/// inverse. Identity pairs never need an entry; the engine bypasses the
/// table for them.
pub struct StaticRateProvider {
    name: String,
    rates: DashMap<CurrencyPair, Decimal>,
}

impl StaticRateProvider {
    /// Create an empty provider.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rates: DashMap::new(),
        }
    }

    /// Insert a rate for an ordered pair. Non-positive rates are rejected.
    pub fn set_rate(&self, pair: CurrencyPair, value: Decimal) {
        if value <= Decimal::ZERO {
            warn!(pair = %pair, %value, "Rejecting non-positive rate");
            return;
        }
        self.rates.insert(pair, value);
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// The built-in demo table.
    pub fn with_builtin_rates() -> Self {
        let provider = Self::new("STATIC");

        for (base, quote, value) in builtin_rates() {
            provider.set_rate(
                CurrencyPair::new(Currency::new(base), Currency::new(quote)),
                value,
            );
        }

        provider
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_rate(&self, pair: &CurrencyPair) -> FxResult<Rate> {
        self.rates
            .get(pair)
            .map(|value| Rate::new(pair.clone(), *value))
            .ok_or_else(|| FxError::RateNotAvailable(pair.clone()))
    }

    fn supports_pair(&self, pair: &CurrencyPair) -> bool {
        self.rates.contains_key(pair)
    }

    fn supported_pairs(&self) -> Vec<CurrencyPair> {
        self.rates.iter().map(|e| e.key().clone()).collect()
    }
}

/// The demo rate table. Deliberately partial and asymmetric.
fn builtin_rates() -> Vec<(&'static str, &'static str, Decimal)> {
    vec![
        ("PKR", "USD", dec!(0.0036)),
        ("PKR", "EUR", dec!(0.0033)),
        ("PKR", "GBP", dec!(0.0028)),
        ("PKR", "INR", dec!(0.30)),
        ("PKR", "CNY", dec!(0.026)),
        ("USD", "PKR", dec!(278)),
        ("USD", "EUR", dec!(0.92)),
        ("USD", "GBP", dec!(0.79)),
        ("USD", "JPY", dec!(155.42)),
        ("USD", "CAD", dec!(1.36)),
        ("USD", "AUD", dec!(1.51)),
        ("USD", "INR", dec!(83.27)),
        ("USD", "CNY", dec!(7.22)),
        ("EUR", "PKR", dec!(300)),
        ("EUR", "USD", dec!(1.09)),
        ("EUR", "GBP", dec!(0.85)),
        ("EUR", "JPY", dec!(168.42)),
        ("EUR", "CAD", dec!(1.47)),
        ("EUR", "AUD", dec!(1.64)),
        ("EUR", "INR", dec!(90.27)),
        ("EUR", "CNY", dec!(7.83)),
        ("GBP", "PKR", dec!(350)),
        ("GBP", "USD", dec!(1.27)),
        ("GBP", "EUR", dec!(1.17)),
        ("GBP", "JPY", dec!(196.45)),
        ("GBP", "CAD", dec!(1.72)),
        ("GBP", "AUD", dec!(1.91)),
        ("GBP", "INR", dec!(105.12)),
        ("GBP", "CNY", dec!(9.13)),
        ("JPY", "USD", dec!(0.0064)),
        ("JPY", "EUR", dec!(0.0059)),
        ("JPY", "GBP", dec!(0.0051)),
        ("JPY", "CAD", dec!(0.0087)),
        ("JPY", "AUD", dec!(0.0097)),
        ("JPY", "INR", dec!(0.53)),
        ("JPY", "CNY", dec!(0.046)),
        ("CAD", "USD", dec!(0.74)),
        ("CAD", "EUR", dec!(0.68)),
        ("CAD", "GBP", dec!(0.58)),
        ("CAD", "JPY", dec!(114.55)),
        ("CAD", "AUD", dec!(1.11)),
        ("CAD", "INR", dec!(61.17)),
        ("CAD", "CNY", dec!(5.31)),
        ("AUD", "USD", dec!(0.66)),
        ("AUD", "EUR", dec!(0.61)),
        ("AUD", "GBP", dec!(0.52)),
        ("AUD", "JPY", dec!(102.83)),
        ("AUD", "CAD", dec!(0.90)),
        ("AUD", "INR", dec!(54.96)),
        ("AUD", "CNY", dec!(4.77)),
        ("INR", "USD", dec!(0.012)),
        ("INR", "EUR", dec!(0.011)),
        ("INR", "GBP", dec!(0.0095)),
        ("INR", "JPY", dec!(1.87)),
        ("INR", "CAD", dec!(0.016)),
        ("INR", "AUD", dec!(0.018)),
        ("INR", "CNY", dec!(0.087)),
        ("INR", "PKR", dec!(3.4)),
        ("CNY", "USD", dec!(0.14)),
        ("CNY", "EUR", dec!(0.13)),
        ("CNY", "GBP", dec!(0.11)),
        ("CNY", "JPY", dec!(21.52)),
        ("CNY", "CAD", dec!(0.19)),
        ("CNY", "AUD", dec!(0.21)),
        ("CNY", "INR", dec!(11.53)),
        ("CNY", "PKR", dec!(38)),
    ]
}
