//! Error types for the demand_forecast crate

use demand_math::MathError;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// History is empty or too short for the requested computation
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Unknown method, non-positive horizon or an out-of-range setting
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed records coming from a history provider
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from the numeric primitives
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error while layering configuration sources
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reading CSV history
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error shaping request or response JSON
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl ForecastError {
    /// Math failures caused by too little data surface as `InsufficientData`
    pub(crate) fn from_math(err: MathError) -> Self {
        match err {
            MathError::InsufficientData(msg) => ForecastError::InsufficientData(msg),
            other => ForecastError::Math(other),
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
