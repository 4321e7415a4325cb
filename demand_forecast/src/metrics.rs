//! Backward-looking accuracy of a forecast

use crate::data::HistoryRecord;
use crate::models::ForecastPoint;

/// Score reported when no actual/forecast pair can be compared
pub const DEFAULT_ACCURACY: f64 = 0.85;

/// Mean absolute percentage error over pairs with a positive actual.
///
/// Returns `None` when no such pair exists.
pub fn mean_absolute_percentage_error(actual: &[f64], forecast: &[f64]) -> Option<f64> {
    let errors: Vec<f64> = actual
        .iter()
        .zip(forecast)
        .filter(|(a, _)| **a > 0.0)
        .map(|(&a, &f)| (a - f).abs() / a)
        .collect();

    if errors.is_empty() {
        return None;
    }
    Some(errors.iter().sum::<f64>() / errors.len() as f64)
}

/// Scores forecasts as `1 − MAPE` against the most recent history
#[derive(Debug, Clone, Copy)]
pub struct AccuracyEvaluator {
    fallback: f64,
}

impl Default for AccuracyEvaluator {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_ACCURACY,
        }
    }
}

impl AccuracyEvaluator {
    pub fn new(fallback: f64) -> Self {
        Self {
            fallback: fallback.clamp(0.0, 1.0),
        }
    }

    /// Compare the last `k` history records with the first `k` forecasts,
    /// `k = min(history, forecasts)`. The result lies in `[0, 1]`.
    pub fn evaluate(&self, history: &[HistoryRecord], forecasts: &[ForecastPoint]) -> f64 {
        let k = history.len().min(forecasts.len());
        if k == 0 {
            return self.fallback;
        }

        let actual: Vec<f64> = history[history.len() - k..]
            .iter()
            .map(|r| r.quantity)
            .collect();
        let predicted: Vec<f64> = forecasts[..k].iter().map(|p| p.quantity).collect();

        match mean_absolute_percentage_error(&actual, &predicted) {
            Some(mape) => (1.0 - mape).clamp(0.0, 1.0),
            None => self.fallback,
        }
    }
}
