//! Ordinary least-squares regression of a series against its position.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Straight line fitted to a series over its 0-based index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    slope: f64,
    intercept: f64,
    observations: usize,
}

impl LinearRegression {
    /// Fit a line through `values`, using the index of each value as x.
    ///
    /// Uses the closed-form normal equations
    /// `slope = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)`.
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Linear regression needs at least 2 points, have {}",
                values.len()
            )));
        }

        let n = values.len() as f64;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_xy = 0.0;
        let mut sum_xx = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let denominator = n * sum_xx - sum_x * sum_x;
        if denominator.abs() < f64::EPSILON {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        Ok(Self {
            slope,
            intercept,
            observations: values.len(),
        })
    }

    /// Change in value per period
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Fitted value at index 0
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of points the line was fitted on
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Fitted value `periods_ahead` steps after the last observation
    pub fn forecast(&self, periods_ahead: usize) -> f64 {
        let x = (self.observations + periods_ahead - 1) as f64;
        self.intercept + self.slope * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_line() {
        let values = [10.0, 12.0, 14.0, 16.0, 18.0];
        let fit = LinearRegression::fit(&values).unwrap();

        assert_relative_eq!(fit.slope(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(fit.forecast(1), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_series_has_zero_slope() {
        let fit = LinearRegression::fit(&[5.0; 8]).unwrap();
        assert!(fit.slope().abs() < 1e-12);
        assert_eq!(fit.observations(), 8);
    }

    #[test]
    fn test_too_few_points() {
        assert!(matches!(
            LinearRegression::fit(&[1.0]),
            Err(MathError::InsufficientData(_))
        ));
        assert!(LinearRegression::fit(&[]).is_err());
    }
}
