//! Exponential smoothing with level and trend state

use crate::data::{quantities, HistoryRecord};
use crate::error::{ForecastError, Result};
use crate::models::{
    check_unit_interval, deseasonalize, require_history, ForecastMethod, ForecastStrategy,
    SeasonalIndexing, SeasonalLookup,
};
use crate::seasonal::SeasonalFactors;
use demand_math::mean;

/// Level/trend smoothing with seasonal factors applied as given.
///
/// No observation exists past the end of history, so every step feeds its own
/// forecast back as the observed value. The level therefore settles on a
/// seasonally adjusted constant and the trend keeps its initial value of 0.
/// Seasonal factors are not re-smoothed; `gamma` is carried for reporting only.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
    beta: f64,
    gamma: f64,
    indexing: SeasonalIndexing,
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
            gamma: 0.2,
            indexing: SeasonalIndexing::Static,
        }
    }
}

impl ExponentialSmoothing {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self> {
        check_unit_interval("Level smoothing (alpha)", alpha)?;
        check_unit_interval("Trend smoothing (beta)", beta)?;
        check_unit_interval("Seasonal smoothing (gamma)", gamma)?;

        Ok(Self {
            alpha,
            beta,
            gamma,
            indexing: SeasonalIndexing::Static,
        })
    }

    pub fn with_indexing(mut self, indexing: SeasonalIndexing) -> Self {
        self.indexing = indexing;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl ForecastStrategy for ExponentialSmoothing {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::ExponentialSmoothing
    }

    fn project(
        &self,
        history: &[HistoryRecord],
        seasonal: &SeasonalFactors,
        horizon: usize,
    ) -> Result<Vec<f64>> {
        if horizon == 0 {
            return Ok(Vec::new());
        }
        require_history(history, self.method())?;
        let lookup = SeasonalLookup::new(seasonal, history, self.indexing)?;

        let mut level = mean(&quantities(history)).map_err(ForecastError::from_math)?;
        let mut trend = 0.0;

        let mut values = Vec::with_capacity(horizon);
        for step in 0..horizon {
            let factor = lookup.factor(step);
            let forecast = (level + trend) * factor;
            values.push(forecast);

            let actual = forecast;
            level = self.alpha * deseasonalize(actual, factor, level + trend)
                + (1.0 - self.alpha) * (level + trend);
            // level delta is taken against the updated level, so trend holds
            trend = self.beta * (level - (level - trend)) + (1.0 - self.beta) * trend;
        }

        Ok(values)
    }
}
