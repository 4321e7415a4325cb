//! # Demand Forecast
//!
//! Short-horizon demand forecasting for inventory items from weekly history.
//!
//! ## Features
//!
//! - Seasonal decomposition over a 13-week cycle
//! - Least-squares trend factor, bounded to `[0.5, 1.5]`
//! - IQR anomaly detection
//! - Three forecasting methods: moving average (`ma`), exponential smoothing
//!   (`ets`) and a level × trend × season composite (`seasonal`)
//! - Prediction intervals and a backward-looking MAPE accuracy score
//! - Pluggable history providers (in-memory, CSV, synthetic)
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use demand_forecast::{DemandForecaster, ForecastConfig, ForecastMethod, ForecastRequest};
//! use demand_forecast::synthetic::SyntheticHistory;
//!
//! let origin = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let forecaster = DemandForecaster::new(SyntheticHistory::new(origin), ForecastConfig::default())?
//!     .with_origin(origin);
//!
//! let request = ForecastRequest::new("MED-MOTOR-001")
//!     .with_weeks(4)
//!     .with_method(ForecastMethod::ExponentialSmoothing);
//! let result = forecaster.forecast(&request)?;
//!
//! assert_eq!(result.forecasts.len(), 4);
//! assert_eq!(result.confidence_intervals.len(), 4);
//! # Ok::<(), demand_forecast::ForecastError>(())
//! ```

pub mod anomaly;
pub mod api;
pub mod confidence;
pub mod config;
pub mod data;
pub mod error;
pub mod forecaster;
pub mod metrics;
pub mod models;
pub mod seasonal;
pub mod synthetic;
pub mod trend;
pub mod utils;

// Re-export commonly used types
pub use crate::anomaly::{AnomalyDetector, AnomalyDirection, AnomalyRecord};
pub use crate::api::{create_forecast_api, ForecastRequest, ForecastResponse};
pub use crate::confidence::{ConfidenceInterval, ConfidenceIntervalCalculator};
pub use crate::config::{init_tracing, ForecastConfig, LoggingConfig};
pub use crate::data::{CsvHistoryProvider, HistoryProvider, HistoryRecord, InMemoryHistory, RecordKind};
pub use crate::error::{ForecastError, Result};
pub use crate::forecaster::DemandForecaster;
pub use crate::metrics::AccuracyEvaluator;
pub use crate::models::{ForecastMethod, ForecastPoint, ForecastResult, ForecastStrategy, SeasonalIndexing};
pub use crate::seasonal::{SeasonalDecomposer, SeasonalFactors, CYCLE_LENGTH};
pub use crate::trend::TrendEstimator;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
