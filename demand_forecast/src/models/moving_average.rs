//! Moving-average forecasting

use crate::data::{quantities, HistoryRecord};
use crate::error::{ForecastError, Result};
use crate::models::{require_history, ForecastMethod, ForecastStrategy, SeasonalIndexing, SeasonalLookup};
use crate::seasonal::SeasonalFactors;
use demand_math::SimpleMovingAverage;

/// Seasonally adjusted trailing average.
///
/// Each forecast is folded back into the level as
/// `(level·window + forecast) / (window + 1)` before the next step.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: usize,
    indexing: SeasonalIndexing,
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            window: 4,
            indexing: SeasonalIndexing::Static,
        }
    }
}

impl MovingAverage {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            window,
            indexing: SeasonalIndexing::Static,
        })
    }

    pub fn with_indexing(mut self, indexing: SeasonalIndexing) -> Self {
        self.indexing = indexing;
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl ForecastStrategy for MovingAverage {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::MovingAverage
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

        let sma = SimpleMovingAverage::from_values(self.window, &quantities(history))
            .map_err(ForecastError::from_math)?;
        let mut level = sma.value().map_err(ForecastError::from_math)?;
        let window = self.window as f64;

        let mut values = Vec::with_capacity(horizon);
        for step in 0..horizon {
            let forecast = level * lookup.factor(step);
            values.push(forecast);
            level = (level * window + forecast) / (window + 1.0);
        }

        Ok(values)
    }
}
