//! Conversion engine with simulated latency.

use std::sync::Arc;
use std::time::Duration;

use cambio_common::{Currency, CurrencyPair, Money, Rate};
use tracing::{info, instrument};

use crate::conversion::{Conversion, ConversionRequest};
use crate::error::FxResult;
use crate::provider::RateProvider;

/// Configuration for the conversion engine.
#[derive(Debug, Clone)]
pub struct ConversionEngineConfig {
    /// Simulated lookup latency applied to every conversion.
    pub latency: Duration,
}

impl Default for ConversionEngineConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(500),
        }
    }
}

/// The conversion engine.
///
/// Stateless apart from its provider; every conversion is recomputed from
/// the request.
pub struct ConversionEngine {
    provider: Arc<dyn RateProvider>,
    config: ConversionEngineConfig,
}

impl ConversionEngine {
    /// Create a new engine with the given provider.
    pub fn new(provider: Arc<dyn RateProvider>, config: ConversionEngineConfig) -> Self {
        Self { provider, config }
    }

    /// The configured simulated latency.
    pub fn latency(&self) -> Duration {
        self.config.latency
    }

    /// Convert an amount to the target currency.
    ///
    /// Same-currency requests always resolve at rate 1 with the amount
    /// passed through unrounded, regardless of table contents.
    #[instrument(skip(self), fields(
        source = %request.amount.currency,
        target = %request.target,
        amount = %request.amount.value
    ))]
    pub async fn convert(&self, request: ConversionRequest) -> FxResult<Conversion> {
        tokio::time::sleep(self.config.latency).await;

        let (rate, output) = if request.amount.currency == request.target {
            let rate = Rate::identity(request.target.clone());
            let output = Money::new(request.amount.value, request.target.clone());
            (rate, output)
        } else {
            let rate = self.provider.get_rate(&request.pair()).await?;
            let output = rate.convert(&request.amount)?;
            (rate, output)
        };

        let conversion = Conversion::new(request.amount, output, rate);

        info!(
            conversion_id = %conversion.id,
            output = %conversion.output,
            "Conversion completed"
        );

        Ok(conversion)
    }

    /// Get the rate between two currencies without converting.
    pub async fn get_rate(&self, from: Currency, to: Currency) -> FxResult<Rate> {
        if from == to {
            return Ok(Rate::identity(from));
        }
        self.provider.get_rate(&CurrencyPair::new(from, to)).await
    }

    /// Check if a currency pair has a table entry.
    pub fn supports_pair(&self, pair: &CurrencyPair) -> bool {
        self.provider.supports_pair(pair)
    }

    /// Get all pairs with table entries.
    pub fn supported_pairs(&self) -> Vec<CurrencyPair> {
        self.provider.supported_pairs()
    }
}
