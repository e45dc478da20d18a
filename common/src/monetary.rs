//! Monetary types for cambio.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of fraction digits for converted results and display.
pub const RESULT_SCALE: u32 = 2;

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }

    pub fn jpy() -> Self {
        Self::new("JPY")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An ordered currency pair.
///
/// The pair (base, quote) and its inverse are distinct table entries; a rate
/// for one says nothing about the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Source currency being converted from.
    pub base: Currency,
    /// Target currency being converted to.
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Get the inverse pair.
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }

    /// Check whether base and quote are the same currency.
    pub fn is_identity(&self) -> bool {
        self.base == self.quote
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A monetary amount with currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount value (high precision decimal).
    pub value: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money instance.
    pub fn new(value: Decimal, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Create from a string value.
    pub fn from_str(value: &str, currency: Currency) -> Result<Self, rust_decimal::Error> {
        Ok(Self {
            value: value.parse()?,
            currency,
        })
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self {
            value: Decimal::ZERO,
            currency,
        }
    }

    /// Check if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Check if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// Error when attempting operations on different currencies.
#[derive(Debug, Clone, Error)]
#[error("Currency mismatch: expected {expected}, got {actual}")]
pub struct CurrencyMismatchError {
    pub expected: Currency,
    pub actual: Currency,
}

/// Exchange rate for an ordered currency pair: one unit of base buys
/// `value` units of quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    /// The currency pair.
    pub pair: CurrencyPair,
    /// The multiplier. Always positive.
    pub value: Decimal,
}

impl Rate {
    /// Create a new rate.
    pub fn new(pair: CurrencyPair, value: Decimal) -> Self {
        Self { pair, value }
    }

    /// The rate-1 pair of a currency with itself.
    pub fn identity(currency: Currency) -> Self {
        Self {
            pair: CurrencyPair::new(currency.clone(), currency),
            value: Decimal::ONE,
        }
    }

    /// Check whether this is a same-currency rate.
    pub fn is_identity(&self) -> bool {
        self.pair.is_identity()
    }

    /// Convert an amount in the base currency into the quote currency,
    /// rounded to [`RESULT_SCALE`] fraction digits.
    pub fn convert(&self, amount: &Money) -> Result<Money, CurrencyMismatchError> {
        if amount.currency != self.pair.base {
            return Err(CurrencyMismatchError {
                expected: self.pair.base.clone(),
                actual: amount.currency.clone(),
            });
        }

        Ok(Money::new(
            (amount.value * self.value).round_dp(RESULT_SCALE),
            self.pair.quote.clone(),
        ))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {} {}", self.pair.base, self.value, self.pair.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_uppercased() {
        assert_eq!(Currency::new("usd"), Currency::usd());
        assert_eq!(Currency::new("Eur").code(), "EUR");
    }

    #[test]
    fn test_pair_inverse_is_distinct() {
        let pair = CurrencyPair::new(Currency::usd(), Currency::eur());
        let inverse = pair.inverse();

        assert_ne!(pair, inverse);
        assert_eq!(inverse.base, Currency::eur());
        assert_eq!(inverse.quote, Currency::usd());
        assert_eq!(inverse.inverse(), pair);
    }

    #[test]
    fn test_rate_conversion_rounds() {
        let rate = Rate::new(
            CurrencyPair::new(Currency::usd(), Currency::jpy()),
            dec!(155.42),
        );
        let usd = Money::from_str("3.33", Currency::usd()).unwrap();

        let jpy = rate.convert(&usd).unwrap();

        assert_eq!(jpy.currency, Currency::jpy());
        // 3.33 * 155.42 = 517.5486
        assert_eq!(jpy.value, dec!(517.55));
    }

    #[test]
    fn test_rate_currency_mismatch() {
        let rate = Rate::new(
            CurrencyPair::new(Currency::usd(), Currency::eur()),
            dec!(0.92),
        );
        let gbp = Money::new(dec!(10), Currency::gbp());

        assert!(rate.convert(&gbp).is_err());
    }

    #[test]
    fn test_identity_rate() {
        let rate = Rate::identity(Currency::jpy());

        assert!(rate.is_identity());
        assert_eq!(rate.value, Decimal::ONE);

        let jpy = Money::new(dec!(100), Currency::jpy());
        let out = rate.convert(&jpy).unwrap();
        assert_eq!(out.value, dec!(100));
    }

    #[test]
    fn test_money_predicates() {
        assert!(Money::zero(Currency::usd()).is_zero());
        assert!(Money::new(dec!(0.01), Currency::usd()).is_positive());
        assert!(!Money::new(dec!(-1), Currency::usd()).is_positive());
    }
}
