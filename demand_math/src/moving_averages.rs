//! Trailing moving average over the most recent observations

use crate::{MathError, Result};
use std::collections::VecDeque;

/// Simple Moving Average (SMA) over a trailing window.
///
/// Until the window fills up the average is taken over the values seen so far,
/// so a short history still yields a level.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    /// Create a new Simple Moving Average with the specified period
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(MathError::InvalidInput(
                "Period must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            period,
            values: VecDeque::with_capacity(period),
            sum: 0.0,
        })
    }

    /// Build an SMA primed with every value of `values`
    pub fn from_values(period: usize, values: &[f64]) -> Result<Self> {
        let mut sma = Self::new(period)?;
        for &value in values {
            sma.update(value);
        }
        Ok(sma)
    }

    /// Push a new value, evicting the oldest once the window is full
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        self.sum += value;

        if self.values.len() > self.period {
            if let Some(old_value) = self.values.pop_front() {
                self.sum -= old_value;
            }
        }
    }

    /// Average of the values currently in the window
    pub fn value(&self) -> Result<f64> {
        if self.values.is_empty() {
            return Err(MathError::InsufficientData(
                "No values for SMA calculation".to_string(),
            ));
        }

        Ok(self.sum / self.values.len() as f64)
    }

    /// Get the current period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Whether the window holds `period` values
    pub fn is_full(&self) -> bool {
        self.values.len() == self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_uses_trailing_window() {
        let sma = SimpleMovingAverage::from_values(4, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert!(sma.is_full());
        assert!((sma.value().unwrap() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_sma_partial_window() {
        let sma = SimpleMovingAverage::from_values(4, &[10.0, 20.0]).unwrap();
        assert!(!sma.is_full());
        assert!((sma.value().unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_sma_invalid_and_empty() {
        assert!(SimpleMovingAverage::new(0).is_err());
        let sma = SimpleMovingAverage::new(3).unwrap();
        assert!(matches!(sma.value(), Err(MathError::InsufficientData(_))));
        assert_eq!(sma.period(), 3);
    }

    #[test]
    fn test_sma_running_sum_tracks_evictions() {
        let mut sma = SimpleMovingAverage::new(3).unwrap();
        for value in [5.0, 7.0, 9.0, 100.0, 2.0, 3.0] {
            sma.update(value);
        }
        // window holds 100, 2, 3
        assert!((sma.value().unwrap() - 35.0).abs() < 1e-12);
        sma.update(4.0);
        assert!((sma.value().unwrap() - 3.0).abs() < 1e-12);
    }
}
