//! Interquartile-range outlier detection

use crate::data::{quantities, HistoryRecord};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use demand_math::positional_quartiles;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which fence a flagged record crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnomalyDirection {
    Low,
    High,
}

/// A history point outside the IQR fences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub date: NaiveDate,
    pub quantity: f64,
    #[serde(rename = "type")]
    pub direction: AnomalyDirection,
    /// Distance from the Q1–Q3 midpoint in units of IQR (of the midpoint when the IQR is zero)
    pub severity: f64,
    pub description: String,
}

/// Flags records below `Q1 − k·IQR` or above `Q3 + k·IQR`
#[derive(Debug, Clone, Copy)]
pub struct AnomalyDetector {
    iqr_multiplier: f64,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
        }
    }
}

impl AnomalyDetector {
    pub fn new(iqr_multiplier: f64) -> Result<Self> {
        if !iqr_multiplier.is_finite() || iqr_multiplier <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "IQR multiplier must be positive, got {}",
                iqr_multiplier
            )));
        }
        Ok(Self { iqr_multiplier })
    }

    pub fn iqr_multiplier(&self) -> f64 {
        self.iqr_multiplier
    }

    /// Detect outliers in `history`, in history order.
    ///
    /// A constant series yields no anomalies. When the IQR is zero but the
    /// series is not constant, the fences collapse onto Q1/Q3 and severity is
    /// measured relative to the midpoint instead of the IQR.
    pub fn detect(&self, history: &[HistoryRecord]) -> Result<Vec<AnomalyRecord>> {
        if history.is_empty() {
            return Err(ForecastError::InsufficientData(
                "Anomaly detection needs at least one record".to_string(),
            ));
        }

        let values = quantities(history);
        let first = values[0];
        if values.iter().all(|&q| q == first) {
            return Ok(Vec::new());
        }

        let quartiles = positional_quartiles(&values).map_err(ForecastError::from_math)?;
        let iqr = quartiles.iqr();

        let lower = quartiles.q1 - self.iqr_multiplier * iqr;
        let upper = quartiles.q3 + self.iqr_multiplier * iqr;
        let midpoint = quartiles.midpoint();
        let scale = if iqr > 0.0 {
            iqr
        } else if midpoint.abs() > 0.0 {
            midpoint.abs()
        } else {
            1.0
        };

        let anomalies: Vec<AnomalyRecord> = history
            .iter()
            .filter(|r| r.quantity < lower || r.quantity > upper)
            .map(|r| {
                let (direction, description) = if r.quantity < lower {
                    (
                        AnomalyDirection::Low,
                        format!("Demand of {} is below the lower fence {:.1}", r.quantity, lower),
                    )
                } else {
                    (
                        AnomalyDirection::High,
                        format!("Demand of {} is above the upper fence {:.1}", r.quantity, upper),
                    )
                };
                AnomalyRecord {
                    date: r.date,
                    quantity: r.quantity,
                    direction,
                    severity: (r.quantity - midpoint).abs() / scale,
                    description,
                }
            })
            .collect();

        debug!(lower, upper, count = anomalies.len(), "IQR anomaly scan");
        Ok(anomalies)
    }
}
