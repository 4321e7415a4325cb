//! Forecast settings and logging setup.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `DEMAND_FORECAST__*` environment variables (`__` separates nested keys,
//! e.g. `DEMAND_FORECAST__LOGGING__LEVEL=debug`).

use crate::error::{ForecastError, Result};
use crate::models::{ForecastMethod, SeasonalIndexing};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "DEMAND_FORECAST";
const DEFAULT_HORIZON: usize = 13;
const DEFAULT_HISTORY_MULTIPLIER: usize = 4;
const DEFAULT_MA_WINDOW: usize = 4;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

/// Tunable constants of the forecasting pipeline
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Horizon used when a request does not name one
    pub default_horizon: usize,
    /// Method used when a request does not name one
    pub default_method: ForecastMethod,
    /// Periods of history loaded per forecast period
    pub history_multiplier: usize,
    pub moving_average_window: usize,
    pub level_smoothing: f64,
    pub trend_smoothing: f64,
    pub seasonal_smoothing: f64,
    /// Weight of the new forecast in the seasonal strategy's level update
    pub seasonal_blend: f64,
    pub seasonal_indexing: SeasonalIndexing,
    pub confidence_base: f64,
    pub confidence_decay: f64,
    pub z_score: f64,
    pub accuracy_fallback: f64,
    pub iqr_multiplier: f64,
    pub logging: LoggingConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_horizon: DEFAULT_HORIZON,
            default_method: ForecastMethod::Seasonal,
            history_multiplier: DEFAULT_HISTORY_MULTIPLIER,
            moving_average_window: DEFAULT_MA_WINDOW,
            level_smoothing: 0.3,
            trend_smoothing: 0.1,
            seasonal_smoothing: 0.2,
            seasonal_blend: 0.3,
            seasonal_indexing: SeasonalIndexing::Static,
            confidence_base: 0.95,
            confidence_decay: 0.95,
            z_score: 1.96,
            accuracy_fallback: 0.85,
            iqr_multiplier: 1.5,
            logging: LoggingConfig::default(),
        }
    }
}

impl ForecastConfig {
    /// Layer defaults, an optional file and the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: ForecastConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file only, ignoring the environment
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: ForecastConfig = Config::builder()
            .add_source(File::from(path.as_ref()).required(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.default_horizon == 0 {
            return Err(invalid("default_horizon must be positive"));
        }
        if self.history_multiplier == 0 {
            return Err(invalid("history_multiplier must be positive"));
        }
        if self.moving_average_window == 0 {
            return Err(invalid("moving_average_window must be positive"));
        }
        for (name, value) in [
            ("level_smoothing", self.level_smoothing),
            ("trend_smoothing", self.trend_smoothing),
            ("seasonal_smoothing", self.seasonal_smoothing),
            ("seasonal_blend", self.seasonal_blend),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(invalid(&format!("{} must be between 0 and 1, got {}", name, value)));
            }
        }
        for (name, value) in [
            ("confidence_base", self.confidence_base),
            ("confidence_decay", self.confidence_decay),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(invalid(&format!("{} must be in (0, 1], got {}", name, value)));
            }
        }
        if !(self.z_score > 0.0 && self.z_score.is_finite()) {
            return Err(invalid("z_score must be positive"));
        }
        if !(0.0..=1.0).contains(&self.accuracy_fallback) {
            return Err(invalid("accuracy_fallback must be within [0, 1]"));
        }
        if !(self.iqr_multiplier > 0.0 && self.iqr_multiplier.is_finite()) {
            return Err(invalid("iqr_multiplier must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ForecastError {
    ForecastError::InvalidParameter(msg.to_string())
}

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is harmless.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("demand_forecast={level},demand_math={level}");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
