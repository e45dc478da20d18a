//! Interactive converter widget state machine.

use std::sync::Arc;

use cambio_common::{Catalog, Currency, Money};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::conversion::{Conversion, ConversionRequest};
use crate::engine::ConversionEngine;
use crate::error::{FxError, FxResult};
use crate::format::format_currency;

/// User-visible message when the requested pair has no table entry.
pub const RATE_UNAVAILABLE_MSG: &str = "Exchange rate not available for selected currencies.";

/// User-visible message for any other conversion fault.
pub const CONVERSION_FAILED_MSG: &str = "Failed to convert currency. Please try again.";

const PLACEHOLDER: &str = "...";
const CONVERTING: &str = "Converting...";

/// A pending conversion issued by the widget.
///
/// Carries the request sequence number and a snapshot of the inputs at issue
/// time. Executing the ticket does not touch the widget; the outcome is
/// handed back through [`ConverterWidget::commit`], which only accepts the
/// most recently issued sequence.
#[derive(Debug, Clone)]
pub struct ConversionTicket {
    seq: u64,
    amount: String,
    source: Currency,
    target: Currency,
}

impl ConversionTicket {
    /// The sequence number this ticket was issued with.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Run the conversion for this ticket's input snapshot.
    pub async fn execute(self, engine: &ConversionEngine) -> (u64, FxResult<Conversion>) {
        let outcome = match parse_amount(&self.amount) {
            Ok(value) => {
                let request =
                    ConversionRequest::new(Money::new(value, self.source), self.target);
                engine.convert(request).await
            }
            Err(err) => Err(err),
        };

        (self.seq, outcome)
    }
}

/// Parse free-form amount input.
///
/// Empty input converts as zero and negative amounts are clamped to zero;
/// anything unparsable is an [`FxError::InvalidAmount`].
fn parse_amount(raw: &str) -> FxResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value = trimmed
        .parse::<Decimal>()
        .map_err(|_| FxError::InvalidAmount(raw.to_string()))?;

    Ok(value.max(Decimal::ZERO))
}

/// Rendering state of the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetView {
    /// No conversion has committed yet.
    Idle,
    /// A conversion is in flight.
    Loading,
    /// The last committed conversion failed; the message suppresses any
    /// stale result.
    Error(String),
    /// The last committed conversion succeeded.
    Success {
        rate_line: String,
        converted: String,
    },
}

/// The conversion widget.
///
/// Holds the user-editable inputs and the committed display state. Every
/// input change issues a [`ConversionTicket`]; results are applied through
/// [`commit`](Self::commit), where the request token decides whether the
/// outcome is current or stale.
pub struct ConverterWidget {
    engine: Arc<ConversionEngine>,
    catalog: Catalog,
    amount_input: String,
    source: Currency,
    target: Currency,
    rate: Option<Decimal>,
    converted: Option<Money>,
    busy: bool,
    error: Option<String>,
    seq: u64,
}

impl ConverterWidget {
    /// Create a widget with the given selections and an amount of 1.
    pub fn new(
        engine: Arc<ConversionEngine>,
        catalog: Catalog,
        source: Currency,
        target: Currency,
    ) -> Self {
        Self {
            engine,
            catalog,
            amount_input: "1".to_string(),
            source,
            target,
            rate: None,
            converted: None,
            busy: false,
            error: None,
            seq: 0,
        }
    }

    /// Update the amount input and begin a conversion.
    pub fn set_amount(&mut self, raw: impl Into<String>) -> ConversionTicket {
        self.amount_input = raw.into();
        self.begin()
    }

    /// Select the source currency and begin a conversion.
    pub fn set_source(&mut self, currency: Currency) -> ConversionTicket {
        self.source = currency;
        self.begin()
    }

    /// Select the target currency and begin a conversion.
    pub fn set_target(&mut self, currency: Currency) -> ConversionTicket {
        self.target = currency;
        self.begin()
    }

    /// Exchange source and target selections and begin a conversion.
    ///
    /// Both fields are read before either is written.
    pub fn swap(&mut self) -> ConversionTicket {
        std::mem::swap(&mut self.source, &mut self.target);
        self.begin()
    }

    /// Manually re-run the conversion with unchanged inputs.
    pub fn refresh(&mut self) -> ConversionTicket {
        self.begin()
    }

    fn begin(&mut self) -> ConversionTicket {
        self.seq += 1;
        self.busy = true;
        self.error = None;

        ConversionTicket {
            seq: self.seq,
            amount: self.amount_input.clone(),
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }

    /// Apply a conversion outcome.
    ///
    /// Only the most recently issued sequence may commit; a stale outcome is
    /// discarded and leaves all display state untouched, including the busy
    /// flag. Returns whether the outcome was committed.
    pub fn commit(&mut self, seq: u64, outcome: FxResult<Conversion>) -> bool {
        if seq != self.seq {
            debug!(seq, latest = self.seq, "Discarding stale conversion result");
            return false;
        }

        self.busy = false;
        match outcome {
            Ok(conversion) => {
                self.rate = Some(conversion.rate.value);
                self.converted = Some(conversion.output);
                self.error = None;
            }
            Err(FxError::RateNotAvailable(pair)) => {
                debug!(pair = %pair, "No table entry for requested pair");
                // The last shown rate is left in place; only the result is
                // suppressed while the error is displayed.
                self.error = Some(RATE_UNAVAILABLE_MSG.to_string());
                self.converted = None;
            }
            Err(err) => {
                warn!(error = %err, "Conversion failed");
                self.error = Some(CONVERSION_FAILED_MSG.to_string());
                self.converted = None;
            }
        }

        true
    }

    /// Begin, execute, and commit a conversion in one await.
    ///
    /// Serializes the conversion; rapid-input overlap only arises when
    /// tickets are executed on separate tasks.
    pub async fn convert_now(&mut self) -> bool {
        let ticket = self.refresh();
        let engine = Arc::clone(&self.engine);
        let (seq, outcome) = ticket.execute(&engine).await;
        self.commit(seq, outcome)
    }

    /// Current rendering state.
    pub fn view(&self) -> WidgetView {
        if self.busy {
            WidgetView::Loading
        } else if let Some(message) = &self.error {
            WidgetView::Error(message.clone())
        } else if self.converted.is_some() {
            WidgetView::Success {
                rate_line: self.rate_line(),
                converted: self.converted_text(),
            }
        } else {
            WidgetView::Idle
        }
    }

    /// The rate display line, or a placeholder before the first commit.
    pub fn rate_line(&self) -> String {
        match self.rate {
            Some(rate) => format!("1 {} = {} {}", self.source, rate, self.target),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// The converted-amount display text.
    pub fn converted_text(&self) -> String {
        if self.busy {
            CONVERTING.to_string()
        } else if let Some(money) = &self.converted {
            format_currency(&money.value, &money.currency, &self.catalog)
        } else {
            PLACEHOLDER.to_string()
        }
    }

    /// The current error banner, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a conversion is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The raw amount input.
    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    /// The selected source currency.
    pub fn source(&self) -> &Currency {
        &self.source
    }

    /// The selected target currency.
    pub fn target(&self) -> &Currency {
        &self.target
    }

    /// The last committed rate.
    pub fn rate(&self) -> Option<Decimal> {
        self.rate
    }

    /// The last committed result.
    pub fn converted(&self) -> Option<&Money> {
        self.converted.as_ref()
    }

    /// The injected catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The conversion engine.
    pub fn engine(&self) -> Arc<ConversionEngine> {
        Arc::clone(&self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConversionEngineConfig;
    use crate::provider::StaticRateProvider;
    use cambio_common::CurrencyPair;
    use rust_decimal_macros::dec;

    fn setup_widget() -> ConverterWidget {
        let provider = Arc::new(StaticRateProvider::with_builtin_rates());
        let engine = Arc::new(ConversionEngine::new(
            provider,
            ConversionEngineConfig::default(),
        ));
        ConverterWidget::new(engine, Catalog::builtin(), Currency::usd(), Currency::eur())
    }

    #[test]
    fn test_initial_state_is_idle() {
        let widget = setup_widget();

        assert_eq!(widget.view(), WidgetView::Idle);
        assert_eq!(widget.rate_line(), "...");
        assert_eq!(widget.converted_text(), "...");
        assert!(!widget.is_busy());
    }

    #[test]
    fn test_swap_exchanges_both_fields() {
        let mut widget = setup_widget();

        widget.swap();

        assert_eq!(widget.source(), &Currency::eur());
        assert_eq!(widget.target(), &Currency::usd());
    }

    #[test]
    fn test_double_swap_restores() {
        let mut widget = setup_widget();

        widget.swap();
        widget.swap();

        assert_eq!(widget.source(), &Currency::usd());
        assert_eq!(widget.target(), &Currency::eur());
    }

    #[test]
    fn test_input_change_begins_conversion() {
        let mut widget = setup_widget();

        let ticket = widget.set_amount("5");

        assert!(widget.is_busy());
        assert_eq!(widget.view(), WidgetView::Loading);
        assert_eq!(widget.converted_text(), "Converting...");
        assert_eq!(ticket.seq(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_usd_to_eur() {
        let mut widget = setup_widget();
        widget.set_amount("1");

        assert!(widget.convert_now().await);

        assert_eq!(widget.rate_line(), "1 USD = 0.92 EUR");
        assert_eq!(widget.converted_text(), "€0.92");
        assert_eq!(
            widget.view(),
            WidgetView::Success {
                rate_line: "1 USD = 0.92 EUR".to_string(),
                converted: "€0.92".to_string(),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_currency_bypasses_table() {
        let provider = Arc::new(StaticRateProvider::new("empty"));
        let engine = Arc::new(ConversionEngine::new(
            provider,
            ConversionEngineConfig::default(),
        ));
        let mut widget =
            ConverterWidget::new(engine, Catalog::builtin(), Currency::jpy(), Currency::jpy());
        widget.set_amount("100");

        assert!(widget.convert_now().await);

        assert_eq!(widget.rate(), Some(Decimal::ONE));
        assert_eq!(widget.converted().unwrap().value, dec!(100));
        assert_eq!(widget.rate_line(), "1 JPY = 1 JPY");
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_pair_shows_error() {
        // Reduced table without the EUR/GBP entry.
        let provider = Arc::new(StaticRateProvider::new("reduced"));
        provider.set_rate(
            CurrencyPair::new(Currency::usd(), Currency::eur()),
            dec!(0.92),
        );
        let engine = Arc::new(ConversionEngine::new(
            provider,
            ConversionEngineConfig::default(),
        ));
        let mut widget =
            ConverterWidget::new(engine, Catalog::builtin(), Currency::eur(), Currency::gbp());
        widget.set_amount("5");

        assert!(widget.convert_now().await);

        assert_eq!(widget.error_message(), Some(RATE_UNAVAILABLE_MSG));
        assert!(widget.converted().is_none());
        assert_eq!(widget.view(), WidgetView::Error(RATE_UNAVAILABLE_MSG.into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_suppresses_stale_result() {
        let mut widget = setup_widget();
        widget.set_amount("1");
        assert!(widget.convert_now().await);
        assert!(widget.converted().is_some());

        // Switch to a pair with no entry; the committed error must hide the
        // previous result.
        widget.set_target(Currency::new("CHF"));
        assert!(widget.convert_now().await);

        assert_eq!(widget.error_message(), Some(RATE_UNAVAILABLE_MSG));
        assert!(widget.converted().is_none());
        assert!(matches!(widget.view(), WidgetView::Error(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_ticket_does_not_commit() {
        let mut widget = setup_widget();
        let engine = widget.engine();

        let first = widget.set_amount("1");
        let second = widget.set_amount("100");

        let (seq1, outcome1) = first.execute(&engine).await;
        let (seq2, outcome2) = second.execute(&engine).await;

        // The stale outcome arrives first and must be dropped without
        // touching display state.
        assert!(!widget.commit(seq1, outcome1));
        assert!(widget.is_busy());
        assert!(widget.converted().is_none());

        assert!(widget.commit(seq2, outcome2));
        assert!(!widget.is_busy());
        assert_eq!(widget.converted().unwrap().value, dec!(92));
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_issued_wins_regardless_of_completion_order() {
        let mut widget = setup_widget();
        let engine = widget.engine();

        let first = widget.set_amount("1");
        let second = widget.set_amount("100");

        // Completion order reversed: the later ticket lands first.
        let (seq2, outcome2) = second.execute(&engine).await;
        let (seq1, outcome1) = first.execute(&engine).await;

        assert!(widget.commit(seq2, outcome2));
        assert!(!widget.commit(seq1, outcome1));

        assert_eq!(widget.converted().unwrap().value, dec!(92));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_amount_converts_as_zero() {
        let mut widget = setup_widget();
        widget.set_amount("");

        assert!(widget.convert_now().await);

        assert_eq!(widget.converted().unwrap().value, Decimal::ZERO);
        assert_eq!(widget.converted_text(), "€0.00");
        assert!(widget.error_message().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_amount_clamped_to_zero() {
        let mut widget = setup_widget();
        widget.set_amount("-5");

        assert!(widget.convert_now().await);

        assert_eq!(widget.converted().unwrap().value, Decimal::ZERO);
        assert!(widget.error_message().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_amount_degrades_to_message() {
        let mut widget = setup_widget();
        widget.set_amount("12x");

        assert!(widget.convert_now().await);

        assert_eq!(widget.error_message(), Some(CONVERSION_FAILED_MSG));
        assert!(widget.converted().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_reruns_with_unchanged_inputs() {
        let mut widget = setup_widget();
        widget.set_amount("2");
        assert!(widget.convert_now().await);
        let before = widget.converted().unwrap().value;

        let ticket = widget.refresh();
        assert!(widget.is_busy());
        let engine = widget.engine();
        let (seq, outcome) = ticket.execute(&engine).await;
        assert!(widget.commit(seq, outcome));

        assert_eq!(widget.converted().unwrap().value, before);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.5").unwrap(), dec!(1.5));
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("-3").unwrap(), Decimal::ZERO);
        assert!(matches!(
            parse_amount("12x"),
            Err(FxError::InvalidAmount(_))
        ));
    }
}
