//! Composite level × trend × season forecasting

use crate::data::{quantities, HistoryRecord};
use crate::error::{ForecastError, Result};
use crate::models::{
    check_unit_interval, deseasonalize, require_history, ForecastMethod, ForecastStrategy,
    SeasonalIndexing, SeasonalLookup,
};
use crate::seasonal::SeasonalFactors;
use crate::trend::TrendEstimator;
use demand_math::mean;

/// Simplified Holt-Winters: the trend factor is estimated once from history,
/// the level blends toward each de-seasonalized forecast.
#[derive(Debug, Clone)]
pub struct SeasonalComposite {
    blend: f64,
    trend: TrendEstimator,
    indexing: SeasonalIndexing,
}

impl Default for SeasonalComposite {
    fn default() -> Self {
        Self {
            blend: 0.3,
            trend: TrendEstimator::new(),
            indexing: SeasonalIndexing::Static,
        }
    }
}

impl SeasonalComposite {
    /// `blend` is the weight of the new de-seasonalized forecast in the level update
    pub fn new(blend: f64) -> Result<Self> {
        check_unit_interval("Seasonal level blend", blend)?;
        Ok(Self {
            blend,
            ..Self::default()
        })
    }

    pub fn with_indexing(mut self, indexing: SeasonalIndexing) -> Self {
        self.indexing = indexing;
        self
    }

    pub fn blend(&self) -> f64 {
        self.blend
    }
}

impl ForecastStrategy for SeasonalComposite {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::Seasonal
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
        let trend = self.trend.estimate(history);

        let mut values = Vec::with_capacity(horizon);
        for step in 0..horizon {
            let factor = lookup.factor(step);
            let forecast = level * trend * factor;
            values.push(forecast);

            level = self.blend * deseasonalize(forecast, factor, level * trend)
                + (1.0 - self.blend) * level;
        }

        Ok(values)
    }
}
