//! # Demand Math
//!
//! Numeric building blocks for weekly demand forecasting.
//! This crate provides the least-squares trend fit, trailing moving averages
//! and the order statistics used by the forecasting engine.

use thiserror::Error;

pub mod moving_averages;
pub mod regression;
pub mod statistics;

pub use moving_averages::SimpleMovingAverage;
pub use regression::LinearRegression;
pub use statistics::{mean, positional_quartiles, sample_std_dev, Quartiles};

/// Errors that can occur in demand-related calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for demand math operations
pub type Result<T> = std::result::Result<T, MathError>;
