//! Descriptive statistics over quantity series

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Arithmetic mean of a non-empty series
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty series".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n − 1 denominator); needs at least two values
pub fn sample_std_dev(values: &[f64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Sample standard deviation needs at least 2 values, have {}",
            values.len()
        )));
    }

    let std_dev = values.iter().std_dev();
    if !std_dev.is_finite() {
        return Err(MathError::CalculationError(
            "Standard deviation is not finite".to_string(),
        ));
    }

    Ok(std_dev)
}

/// First and third quartile picked by position from the sorted series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q3: f64,
}

impl Quartiles {
    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Point halfway between Q1 and Q3
    pub fn midpoint(&self) -> f64 {
        (self.q1 + self.q3) / 2.0
    }
}

/// Positional (non-interpolated) quartiles: Q1 = sorted[⌊n/4⌋], Q3 = sorted[⌊3n/4⌋]
pub fn positional_quartiles(values: &[f64]) -> Result<Quartiles> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take quartiles of an empty series".to_string(),
        ));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::InvalidInput(
            "Series contains NaN values".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    Ok(Quartiles {
        q1: sorted[n / 4],
        q3: sorted[n * 3 / 4],
    })
}
