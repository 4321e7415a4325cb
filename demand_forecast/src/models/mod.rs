//! Forecasting strategies and the result they feed into

use crate::anomaly::AnomalyRecord;
use crate::confidence::ConfidenceInterval;
use crate::config::ForecastConfig;
use crate::data::HistoryRecord;
use crate::error::{ForecastError, Result};
use crate::seasonal::{SeasonalFactors, CYCLE_LENGTH};
use crate::utils::{future_period_dates, round_units};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

pub mod exponential_smoothing;
pub mod moving_average;
pub mod seasonal;

pub use exponential_smoothing::ExponentialSmoothing;
pub use moving_average::MovingAverage;
pub use seasonal::SeasonalComposite;

/// Forecasting method selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ForecastMethod {
    /// Trailing moving average (`ma`)
    #[serde(rename = "ma", alias = "MA")]
    MovingAverage,
    /// Level/trend exponential smoothing (`ets`)
    #[serde(rename = "ets", alias = "ETS")]
    ExponentialSmoothing,
    /// Level × trend × season composite (`seasonal`)
    #[default]
    #[serde(rename = "seasonal", alias = "SEASONAL")]
    Seasonal,
}

impl ForecastMethod {
    pub const ALL: [ForecastMethod; 3] = [
        ForecastMethod::MovingAverage,
        ForecastMethod::ExponentialSmoothing,
        ForecastMethod::Seasonal,
    ];

    /// Request code: `ma`, `ets` or `seasonal`
    pub fn code(&self) -> &'static str {
        match self {
            ForecastMethod::MovingAverage => "ma",
            ForecastMethod::ExponentialSmoothing => "ets",
            ForecastMethod::Seasonal => "seasonal",
        }
    }

    /// Tag stamped on each forecast point
    pub fn tag(&self) -> &'static str {
        match self {
            ForecastMethod::MovingAverage => "MA",
            ForecastMethod::ExponentialSmoothing => "ETS",
            ForecastMethod::Seasonal => "SEASONAL",
        }
    }

    /// Build the strategy for this method from the configured constants
    pub fn strategy(&self, config: &ForecastConfig) -> Result<Box<dyn ForecastStrategy>> {
        let indexing = config.seasonal_indexing;
        Ok(match self {
            ForecastMethod::MovingAverage => {
                Box::new(MovingAverage::new(config.moving_average_window)?.with_indexing(indexing))
            }
            ForecastMethod::ExponentialSmoothing => Box::new(
                ExponentialSmoothing::new(
                    config.level_smoothing,
                    config.trend_smoothing,
                    config.seasonal_smoothing,
                )?
                .with_indexing(indexing),
            ),
            ForecastMethod::Seasonal => {
                Box::new(SeasonalComposite::new(config.seasonal_blend)?.with_indexing(indexing))
            }
        })
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ForecastMethod {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ma" => Ok(ForecastMethod::MovingAverage),
            "ets" => Ok(ForecastMethod::ExponentialSmoothing),
            "seasonal" => Ok(ForecastMethod::Seasonal),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown forecast method '{}', expected one of ma, ets, seasonal",
                other
            ))),
        }
    }
}

mod method_tag {
    use super::ForecastMethod;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &ForecastMethod, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.tag())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ForecastMethod, D::Error> {
        let tag = String::deserialize(d)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}

/// How the seasonal factor is chosen across the horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalIndexing {
    /// One factor for the whole horizon, at `history_length mod 13` in map order
    #[default]
    Static,
    /// Each step uses the factor of the calendar week it lands on
    Advancing,
}

/// Resolves the seasonal factor for each forecast step
#[derive(Debug, Clone, Copy)]
pub(crate) struct SeasonalLookup<'a> {
    factors: &'a SeasonalFactors,
    indexing: SeasonalIndexing,
    history_len: usize,
    last_period: usize,
}

impl<'a> SeasonalLookup<'a> {
    pub(crate) fn new(
        factors: &'a SeasonalFactors,
        history: &[HistoryRecord],
        indexing: SeasonalIndexing,
    ) -> Result<Self> {
        if factors.is_empty() {
            return Err(ForecastError::InsufficientData(
                "No seasonal factors to forecast with".to_string(),
            ));
        }
        let last_period = history
            .last()
            .map(|r| r.period_index as usize)
            .unwrap_or(history.len());

        Ok(Self {
            factors,
            indexing,
            history_len: history.len(),
            last_period,
        })
    }

    /// Factor for the 0-based forecast `step`
    pub(crate) fn factor(&self, step: usize) -> f64 {
        let static_index = self.history_len % CYCLE_LENGTH;
        let factor = match self.indexing {
            SeasonalIndexing::Static => self.factors.at(static_index),
            SeasonalIndexing::Advancing => self
                .factors
                .for_period(self.last_period + step + 1)
                .or_else(|| self.factors.at(static_index + step)),
        };
        factor.unwrap_or(1.0)
    }
}

/// Divide a seasonally adjusted value back out, or fall back when the factor is zero
pub(crate) fn deseasonalize(value: f64, factor: f64, fallback: f64) -> f64 {
    if factor != 0.0 {
        value / factor
    } else {
        fallback
    }
}

/// One forward-looking point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// 1-based step into the horizon
    #[serde(rename = "week")]
    pub period_index: u32,
    /// Forecast quantity in whole units
    pub quantity: f64,
    #[serde(with = "method_tag")]
    pub method: ForecastMethod,
}

/// Common contract of the forecasting strategies
pub trait ForecastStrategy: Debug + Send + Sync {
    /// Method this strategy implements
    fn method(&self) -> ForecastMethod;

    /// Unrounded forecast quantities, one per step of `horizon`
    fn project(
        &self,
        history: &[HistoryRecord],
        seasonal: &SeasonalFactors,
        horizon: usize,
    ) -> Result<Vec<f64>>;

    /// Forecast points dated one period apart, starting one period after `origin`
    fn generate(
        &self,
        history: &[HistoryRecord],
        seasonal: &SeasonalFactors,
        horizon: usize,
        origin: NaiveDate,
    ) -> Result<Vec<ForecastPoint>> {
        if horizon == 0 {
            return Ok(Vec::new());
        }

        let dates = future_period_dates(origin, horizon)?;
        let values = self.project(history, seasonal, horizon)?;
        if values.len() != horizon {
            return Err(ForecastError::DataError(format!(
                "Values length ({}) doesn't match horizon ({})",
                values.len(),
                horizon
            )));
        }

        let method = self.method();
        Ok(values
            .into_iter()
            .zip(dates)
            .enumerate()
            .map(|(step, (value, date))| ForecastPoint {
                date,
                period_index: step as u32 + 1,
                quantity: round_units(value),
                method,
            })
            .collect())
    }
}

/// Complete answer to one forecast request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub material_id: String,
    pub method: ForecastMethod,
    pub forecasts: Vec<ForecastPoint>,
    pub confidence_intervals: Vec<ConfidenceInterval>,
    pub seasonal_factors: SeasonalFactors,
    /// Within `[0.5, 1.5]`
    pub trend_factor: f64,
    /// Within `[0, 1]`
    pub accuracy: f64,
    pub anomalies: Vec<AnomalyRecord>,
    pub generated_at: DateTime<Utc>,
}

impl ForecastResult {
    /// Number of forecast periods
    pub fn horizon(&self) -> usize {
        self.forecasts.len()
    }

    /// Forecast quantities in order
    pub fn quantities(&self) -> Vec<f64> {
        self.forecasts.iter().map(|p| p.quantity).collect()
    }

    /// Sum of forecast demand over the horizon
    pub fn total_demand(&self) -> f64 {
        self.forecasts.iter().map(|p| p.quantity).sum()
    }
}

/// Shared input checks for strategies
pub(crate) fn require_history(history: &[HistoryRecord], method: ForecastMethod) -> Result<()> {
    if history.is_empty() {
        return Err(ForecastError::InsufficientData(format!(
            "{} forecast needs at least one history record",
            method.tag()
        )));
    }
    Ok(())
}

/// Smoothing constants must lie strictly between 0 and 1
pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}
