//! Conversion error types.

use cambio_common::{Currency, CurrencyPair};
use thiserror::Error;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum FxError {
    /// Rate not available for the requested currency pair.
    #[error("Rate not available for {0}")]
    RateNotAvailable(CurrencyPair),

    /// Amount input could not be parsed as a number.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Currency mismatch in conversion.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: Currency, actual: Currency },
}

impl From<cambio_common::CurrencyMismatchError> for FxError {
    fn from(err: cambio_common::CurrencyMismatchError) -> Self {
        FxError::CurrencyMismatch {
            expected: err.expected,
            actual: err.actual,
        }
    }
}

/// Result type for conversion operations.
pub type FxResult<T> = Result<T, FxError>;
