//! Prediction intervals around forecast points

use crate::data::{quantities, HistoryRecord};
use crate::error::{ForecastError, Result};
use crate::models::ForecastPoint;
use crate::utils::round_units;
use demand_math::sample_std_dev;
use serde::{Deserialize, Serialize};

/// Symmetric band around one forecast point, clipped at zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// 1-based step the interval belongs to
    pub week: u32,
    pub lower: f64,
    pub upper: f64,
    /// Decayed confidence in percent
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, quantity: f64) -> bool {
        quantity >= self.lower && quantity <= self.upper
    }
}

/// Builds intervals from the historical spread and a geometrically decaying confidence.
///
/// Confidence at step `i` is `base · decay^i`, and the margin scales with it,
/// so intervals get narrower further out. This is the reverse of how forecast
/// uncertainty usually behaves; downstream consumers rely on it as is.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceIntervalCalculator {
    base_confidence: f64,
    decay: f64,
    z_score: f64,
}

impl Default for ConfidenceIntervalCalculator {
    fn default() -> Self {
        Self {
            base_confidence: 0.95,
            decay: 0.95,
            z_score: 1.96,
        }
    }
}

impl ConfidenceIntervalCalculator {
    pub fn new(base_confidence: f64, decay: f64, z_score: f64) -> Result<Self> {
        if !(base_confidence > 0.0 && base_confidence <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Base confidence must be in (0, 1], got {}",
                base_confidence
            )));
        }
        if !(decay > 0.0 && decay <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Confidence decay must be in (0, 1], got {}",
                decay
            )));
        }
        if !(z_score > 0.0 && z_score.is_finite()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Z-score must be positive, got {}",
                z_score
            )));
        }

        Ok(Self {
            base_confidence,
            decay,
            z_score,
        })
    }

    /// Confidence for the 0-based forecast step
    pub fn confidence_at(&self, step: usize) -> f64 {
        self.base_confidence * self.decay.powi(step as i32)
    }

    /// One interval per forecast point, in the same order
    pub fn compute(
        &self,
        history: &[HistoryRecord],
        forecasts: &[ForecastPoint],
    ) -> Result<Vec<ConfidenceInterval>> {
        if forecasts.is_empty() {
            return Ok(Vec::new());
        }

        let spread = historical_spread(history)?;

        Ok(forecasts
            .iter()
            .enumerate()
            .map(|(step, point)| {
                let confidence = self.confidence_at(step);
                let margin = spread * self.z_score * confidence;
                ConfidenceInterval {
                    week: point.period_index,
                    lower: round_units((point.quantity - margin).max(0.0)),
                    upper: round_units(point.quantity + margin),
                    confidence_level: confidence * 100.0,
                }
            })
            .collect())
    }
}

/// Sample standard deviation, or a tenth of the value for a single record
fn historical_spread(history: &[HistoryRecord]) -> Result<f64> {
    match history {
        [] => Err(ForecastError::InsufficientData(
            "Confidence intervals need at least one history record".to_string(),
        )),
        [only] => Ok(only.quantity * 0.1),
        _ => sample_std_dev(&quantities(history)).map_err(ForecastError::from_math),
    }
}
