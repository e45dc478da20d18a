//! Cambio FX
//!
//! Currency conversion over a static rate table, with simulated latency and
//! an interactive converter widget.
//!
//! # Features
//!
//! - Injected rate provider seam with a static built-in table
//! - Conversion engine with configurable simulated latency
//! - Converter widget state machine with request-token staleness handling
//! - Locale-style currency formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use cambio_fx::{ConversionEngine, ConversionEngineConfig, ConverterWidget, StaticRateProvider};
//! use cambio_common::{Catalog, Currency};
//!
//! let provider = Arc::new(StaticRateProvider::with_builtin_rates());
//! let engine = Arc::new(ConversionEngine::new(provider, ConversionEngineConfig::default()));
//! let mut widget = ConverterWidget::new(engine, Catalog::builtin(), Currency::usd(), Currency::eur());
//!
//! widget.set_amount("1");
//! widget.convert_now().await;
//! println!("{}", widget.rate_line()); // 1 USD = 0.92 EUR
//! ```

pub mod conversion;
pub mod engine;
pub mod error;
pub mod format;
pub mod provider;
pub mod widget;

pub use conversion::{Conversion, ConversionRequest};
pub use engine::{ConversionEngine, ConversionEngineConfig};
pub use error::{FxError, FxResult};
pub use format::format_currency;
pub use provider::{RateProvider, StaticRateProvider};
pub use widget::{ConversionTicket, ConverterWidget, WidgetView};
