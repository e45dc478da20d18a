//! Widget driver.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{info, warn};

use cambio_common::{Currency, CurrencyPair};
use cambio_fx::{
    Conversion, ConversionEngine, ConversionTicket, ConverterWidget, FxResult, WidgetView,
};

use crate::metrics::SimulationMetrics;
use crate::scenario::{Scenario, ScenarioStep};

type CommitMessage = (u64, FxResult<Conversion>, u64);

/// Drives the converter widget with input events.
///
/// The widget is the single actor; in-flight conversions run as spawned
/// tasks and hand their outcomes back over a channel, exactly like the
/// original's independent timers.
pub struct WidgetDriver {
    widget: ConverterWidget,
    engine: Arc<ConversionEngine>,
    speed: f64,
    tx: mpsc::UnboundedSender<CommitMessage>,
    rx: mpsc::UnboundedReceiver<CommitMessage>,
    metrics: SimulationMetrics,
    pending: usize,
}

impl WidgetDriver {
    /// Create a driver around a widget.
    pub fn new(widget: ConverterWidget, speed: f64) -> Self {
        let engine = widget.engine();
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            widget,
            engine,
            speed,
            tx,
            rx,
            metrics: SimulationMetrics::new(),
            pending: 0,
        }
    }

    /// Announce the featured headline rates shown above the widget.
    pub async fn announce_featured_rates(&self) {
        for (base, quote) in [("PKR", "USD"), ("USD", "PKR"), ("EUR", "PKR")] {
            let pair = CurrencyPair::new(Currency::new(base), Currency::new(quote));
            if let Ok(rate) = self.engine.get_rate(pair.base, pair.quote).await {
                info!("{}", rate);
            }
        }
    }

    /// Run a scripted scenario to completion.
    pub async fn run_scenario(&mut self, scenario: Scenario) -> anyhow::Result<()> {
        info!(
            "Running scenario: {} - {}",
            scenario.name, scenario.description
        );

        // The widget converts once on first render.
        let ticket = self.widget.refresh();
        self.dispatch(ticket);
        self.render();

        for step in scenario.steps {
            self.execute_step(step).await;
        }

        self.drain().await;
        Ok(())
    }

    /// Generate random input events until the duration elapses.
    pub async fn run_random(&mut self, duration: Duration, seed: Option<u64>) -> anyhow::Result<()> {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let codes: Vec<Currency> = self.widget.catalog().iter().map(|e| e.code.clone()).collect();
        let deadline = Instant::now() + duration;

        let ticket = self.widget.refresh();
        self.dispatch(ticket);
        self.render();

        while Instant::now() < deadline {
            let ticket = match rng.gen_range(0..6) {
                0 | 1 => {
                    let value = random_amount(&mut rng);
                    info!(amount = %value, "Typing amount");
                    self.widget.set_amount(value)
                }
                2 => {
                    let currency = codes[rng.gen_range(0..codes.len())].clone();
                    info!(%currency, "Selecting source");
                    self.widget.set_source(currency)
                }
                3 => {
                    let currency = codes[rng.gen_range(0..codes.len())].clone();
                    info!(%currency, "Selecting target");
                    self.widget.set_target(currency)
                }
                4 => {
                    info!("Swapping currencies");
                    self.widget.swap()
                }
                _ => {
                    info!("Pressing refresh");
                    self.widget.refresh()
                }
            };
            self.dispatch(ticket);
            self.render();

            let pause = rng.gen_range(50..700);
            self.wait(self.adjusted(pause)).await;
        }

        self.drain().await;
        Ok(())
    }

    async fn execute_step(&mut self, step: ScenarioStep) {
        match step {
            ScenarioStep::Wait { millis } => {
                self.wait(self.adjusted(millis)).await;
                return;
            }
            ScenarioStep::SetAmount { value } => {
                info!(amount = %value, "Typing amount");
                let ticket = self.widget.set_amount(value);
                self.dispatch(ticket);
            }
            ScenarioStep::SelectSource { currency } => {
                let currency = Currency::new(currency);
                if !self.widget.catalog().contains(&currency) {
                    warn!(%currency, "Currency not in catalog, skipping step");
                    return;
                }
                info!(%currency, "Selecting source");
                let ticket = self.widget.set_source(currency);
                self.dispatch(ticket);
            }
            ScenarioStep::SelectTarget { currency } => {
                let currency = Currency::new(currency);
                if !self.widget.catalog().contains(&currency) {
                    warn!(%currency, "Currency not in catalog, skipping step");
                    return;
                }
                info!(%currency, "Selecting target");
                let ticket = self.widget.set_target(currency);
                self.dispatch(ticket);
            }
            ScenarioStep::Swap => {
                info!("Swapping currencies");
                let ticket = self.widget.swap();
                self.dispatch(ticket);
            }
            ScenarioStep::Refresh => {
                info!("Pressing refresh");
                let ticket = self.widget.refresh();
                self.dispatch(ticket);
            }
        }

        self.render();
    }

    /// Hand a ticket to a spawned task; its outcome comes back over the
    /// channel whenever the simulated delay elapses.
    fn dispatch(&mut self, ticket: ConversionTicket) {
        self.metrics.record_issued();
        self.pending += 1;

        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let start = Instant::now();
            let (seq, outcome) = ticket.execute(&engine).await;
            let elapsed = start.elapsed().as_millis() as u64;
            let _ = tx.send((seq, outcome, elapsed));
        });
    }

    /// Let time pass, applying conversion outcomes as they land.
    async fn wait(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;

        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => break,
                Some(msg) = self.rx.recv() => self.apply(msg),
            }
        }
    }

    /// Wait for every in-flight conversion to resolve.
    async fn drain(&mut self) {
        while self.pending > 0 {
            match self.rx.recv().await {
                Some(msg) => self.apply(msg),
                None => break,
            }
        }
    }

    fn apply(&mut self, (seq, outcome, elapsed): CommitMessage) {
        self.pending = self.pending.saturating_sub(1);

        if self.widget.commit(seq, outcome) {
            self.metrics
                .record_committed(elapsed, self.widget.error_message().is_some());
            self.render();
        } else {
            self.metrics.record_stale();
        }
    }

    fn render(&self) {
        match self.widget.view() {
            WidgetView::Idle => {
                info!(rate = %self.widget.rate_line(), result = "...", "Frame");
            }
            WidgetView::Loading => {
                info!(rate = %self.widget.rate_line(), result = "Converting...", "Frame");
            }
            WidgetView::Error(message) => {
                warn!(%message, "Frame");
            }
            WidgetView::Success { rate_line, converted } => {
                info!(
                    rate = %rate_line,
                    result = %converted,
                    input = %format!("{} {}", self.widget.amount_input(), self.widget.source()),
                    "Frame"
                );
            }
        }
    }

    fn adjusted(&self, millis: u64) -> Duration {
        Duration::from_millis((millis as f64 / self.speed) as u64)
    }

    /// Metrics for the run so far.
    pub fn metrics(&self) -> &SimulationMetrics {
        &self.metrics
    }
}

/// Random free-form amount input, occasionally malformed to exercise the
/// failure banner.
fn random_amount(rng: &mut StdRng) -> String {
    if rng.gen_bool(0.1) {
        return "12x".to_string();
    }
    format!("{:.2}", rng.gen_range(0.0..10_000.0))
}
