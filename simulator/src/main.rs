//! Cambio Simulator
//!
//! Drives the converter widget with scripted or randomized input.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod controller;
mod metrics;
mod scenario;

use cambio_common::{Catalog, Currency};
use cambio_fx::{ConversionEngine, ConversionEngineConfig, ConverterWidget, StaticRateProvider};
use controller::WidgetDriver;
use scenario::Scenario;

/// Cambio Simulator CLI
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Cambio converter widget simulation environment")]
struct Args {
    /// Built-in scenario to run
    #[arg(short, long)]
    scenario: Option<String>,

    /// JSON scenario file to run
    #[arg(long)]
    scenario_file: Option<PathBuf>,

    /// Initial source currency
    #[arg(long, default_value = "PKR")]
    source: String,

    /// Initial target currency
    #[arg(long, default_value = "USD")]
    target: String,

    /// Simulated conversion latency in milliseconds
    #[arg(long, default_value = "500")]
    latency_ms: u64,

    /// Simulation speed multiplier
    #[arg(long, default_value = "1.0")]
    speed: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Randomized-input run duration in seconds
    #[arg(long, default_value = "10")]
    duration: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let catalog = Catalog::builtin();
    let source = Currency::new(args.source.as_str());
    let target = Currency::new(args.target.as_str());
    for currency in [&source, &target] {
        if !catalog.contains(currency) {
            anyhow::bail!("Unknown currency: {}", currency);
        }
    }

    let provider = Arc::new(StaticRateProvider::with_builtin_rates());
    let engine = Arc::new(ConversionEngine::new(
        provider,
        ConversionEngineConfig {
            latency: Duration::from_millis(args.latency_ms),
        },
    ));
    let widget = ConverterWidget::new(engine, catalog, source, target);

    info!("Starting cambio simulator");
    info!("Latency: {}ms", args.latency_ms);
    info!("Speed: {}x", args.speed);

    let mut driver = WidgetDriver::new(widget, args.speed);
    driver.announce_featured_rates().await;

    if let Some(path) = &args.scenario_file {
        let scenario = Scenario::from_file(path)?;
        driver.run_scenario(scenario).await?;
    } else if let Some(name) = &args.scenario {
        info!("Running scenario: {}", name);
        let scenario = Scenario::load(name)?;
        driver.run_scenario(scenario).await?;
    } else {
        info!("Running with randomized input");
        driver
            .run_random(Duration::from_secs(args.duration), args.seed)
            .await?;
    }

    // Print metrics
    let metrics = driver.metrics();
    info!("Simulation complete");
    info!("Conversions issued: {}", metrics.issued);
    info!("Committed: {}", metrics.committed);
    info!("Stale dropped: {}", metrics.stale_dropped);
    info!("Errors surfaced: {}", metrics.errors);
    info!("Average latency: {}ms", metrics.average_latency_ms());

    Ok(())
}
