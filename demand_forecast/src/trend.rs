//! Bounded multiplicative trend from a least-squares slope

use crate::data::{quantities, HistoryRecord};
use demand_math::LinearRegression;
use tracing::warn;

/// Lowest trend factor reported
pub const MIN_TREND_FACTOR: f64 = 0.5;
/// Highest trend factor reported
pub const MAX_TREND_FACTOR: f64 = 1.5;
/// Trend factor meaning "no change"
pub const NEUTRAL_TREND: f64 = 1.0;

/// Converts the OLS slope of quantity against week index into a trend factor
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendEstimator;

impl TrendEstimator {
    pub fn new() -> Self {
        Self
    }

    /// `1 + slope / mean`, clamped to `[0.5, 1.5]`.
    ///
    /// Fewer than two records, or a non-positive mean, give exactly 1.0.
    pub fn estimate(&self, history: &[HistoryRecord]) -> f64 {
        if history.len() < 2 {
            return NEUTRAL_TREND;
        }

        let values = quantities(history);
        let fit = match LinearRegression::fit(&values) {
            Ok(fit) => fit,
            Err(err) => {
                warn!(error = %err, "Trend fit failed, assuming no trend");
                return NEUTRAL_TREND;
            }
        };

        let average = values.iter().sum::<f64>() / values.len() as f64;
        let factor = if average > 0.0 {
            1.0 + fit.slope() / average
        } else {
            NEUTRAL_TREND
        };

        if !factor.is_finite() {
            return NEUTRAL_TREND;
        }
        factor.clamp(MIN_TREND_FACTOR, MAX_TREND_FACTOR)
    }
}
