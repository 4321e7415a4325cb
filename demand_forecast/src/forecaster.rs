//! End-to-end forecast pipeline for one item at a time

use crate::anomaly::AnomalyDetector;
use crate::api::ForecastRequest;
use crate::confidence::ConfidenceIntervalCalculator;
use crate::config::ForecastConfig;
use crate::data::{HistoryProvider, HistoryRecord};
use crate::error::{ForecastError, Result};
use crate::metrics::AccuracyEvaluator;
use crate::models::{ForecastMethod, ForecastResult};
use crate::seasonal::SeasonalDecomposer;
use crate::trend::TrendEstimator;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Runs decomposition, trend, anomaly scan, forecast, intervals and accuracy.
///
/// Holds no state between calls besides the read-only provider and settings,
/// so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct DemandForecaster<P> {
    provider: P,
    config: ForecastConfig,
    origin: Option<NaiveDate>,
}

impl<P: HistoryProvider> DemandForecaster<P> {
    /// Create a forecaster; the settings are validated up front
    pub fn new(provider: P, config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            origin: None,
        })
    }

    /// Pin "now"; forecasts start one week after this date
    pub fn with_origin(mut self, origin: NaiveDate) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn origin(&self) -> NaiveDate {
        self.origin.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Validate `request`, load history from the provider and forecast
    #[instrument(skip(self, request), fields(material_id = %request.material_id))]
    pub fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        let (horizon, method) = request.resolve(&self.config)?;
        let periods = horizon
            .checked_mul(self.config.history_multiplier)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!("Horizon {} is too large", horizon))
            })?;

        let history = self.provider.load(&request.material_id, periods)?;
        debug!(requested = periods, loaded = history.len(), "Loaded history");

        self.forecast_history(&request.material_id, &history, horizon, method)
    }

    /// Run the pipeline on caller-supplied history
    pub fn forecast_history(
        &self,
        material_id: &str,
        history: &[HistoryRecord],
        horizon: usize,
        method: ForecastMethod,
    ) -> Result<ForecastResult> {
        if history.is_empty() {
            return Err(ForecastError::InsufficientData(format!(
                "No history available for material {}",
                material_id
            )));
        }

        let config = &self.config;
        let seasonal_factors = SeasonalDecomposer::new().decompose(history)?;
        let trend_factor = TrendEstimator::new().estimate(history);
        let anomalies = AnomalyDetector::new(config.iqr_multiplier)?.detect(history)?;

        let strategy = method.strategy(config)?;
        let forecasts = strategy.generate(history, &seasonal_factors, horizon, self.origin())?;

        let confidence_intervals = ConfidenceIntervalCalculator::new(
            config.confidence_base,
            config.confidence_decay,
            config.z_score,
        )?
        .compute(history, &forecasts)?;
        let accuracy = AccuracyEvaluator::new(config.accuracy_fallback).evaluate(history, &forecasts);

        info!(
            material_id,
            method = %method,
            horizon,
            history = history.len(),
            anomalies = anomalies.len(),
            trend_factor,
            accuracy,
            "Forecast complete"
        );

        Ok(ForecastResult {
            material_id: material_id.to_string(),
            method,
            forecasts,
            confidence_intervals,
            seasonal_factors,
            trend_factor,
            accuracy,
            anomalies,
            generated_at: Utc::now(),
        })
    }

    /// Forecast several requests independently; a failing key does not stop the rest
    pub fn forecast_batch(
        &self,
        requests: &BTreeMap<String, ForecastRequest>,
    ) -> BTreeMap<String, Result<ForecastResult>> {
        requests
            .iter()
            .map(|(key, request)| {
                let result = self.forecast(request);
                if let Err(err) = &result {
                    warn!(key = %key, error = %err, "Batch forecast entry failed");
                }
                (key.clone(), result)
            })
            .collect()
    }
}
