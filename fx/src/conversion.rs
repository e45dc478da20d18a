//! Conversion request and result types.

use cambio_common::{Currency, CurrencyPair, Money, Rate};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to perform a conversion.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Amount to convert.
    pub amount: Money,
    /// Target currency.
    pub target: Currency,
}

impl ConversionRequest {
    /// Create a new conversion request.
    pub fn new(amount: Money, target: Currency) -> Self {
        Self { amount, target }
    }

    /// The requested currency pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.amount.currency.clone(), self.target.clone())
    }
}

/// A completed currency conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    /// Unique conversion ID.
    pub id: Uuid,
    /// Input amount.
    pub input: Money,
    /// Output amount.
    pub output: Money,
    /// Rate used for conversion.
    pub rate: Rate,
    /// When the conversion was executed.
    pub executed_at: DateTime<Utc>,
}

impl Conversion {
    /// Create a new conversion record.
    pub fn new(input: Money, output: Money, rate: Rate) -> Self {
        Self {
            id: Uuid::now_v7(),
            input,
            output,
            rate,
            executed_at: Utc::now(),
        }
    }

    /// Get the effective rate after rounding.
    pub fn effective_rate(&self) -> Decimal {
        if self.input.value.is_zero() {
            return Decimal::ZERO;
        }
        self.output.value / self.input.value
    }

    /// Get the currency pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.input.currency.clone(), self.output.currency.clone())
    }
}
