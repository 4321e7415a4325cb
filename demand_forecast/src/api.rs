//! JSON request and response shapes

use crate::config::ForecastConfig;
use crate::data::HistoryProvider;
use crate::error::{ForecastError, Result};
use crate::forecaster::DemandForecaster;
use crate::models::{ForecastMethod, ForecastResult};
use serde::{Deserialize, Serialize};

/// Forecast request: `{material_id, weeks?, method?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub material_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl ForecastRequest {
    pub fn new(material_id: impl Into<String>) -> Self {
        Self {
            material_id: material_id.into(),
            weeks: None,
            method: None,
        }
    }

    pub fn with_weeks(mut self, weeks: i64) -> Self {
        self.weeks = Some(weeks);
        self
    }

    pub fn with_method(mut self, method: ForecastMethod) -> Self {
        self.method = Some(method.code().to_string());
        self
    }

    /// Horizon and method, falling back to the configured defaults
    pub fn resolve(&self, config: &ForecastConfig) -> Result<(usize, ForecastMethod)> {
        if self.material_id.trim().is_empty() {
            return Err(ForecastError::InvalidParameter(
                "material_id is required".to_string(),
            ));
        }

        let horizon = match self.weeks {
            None => config.default_horizon,
            Some(weeks) if weeks > 0 => weeks as usize,
            Some(weeks) => {
                return Err(ForecastError::InvalidParameter(format!(
                    "weeks must be positive, got {}",
                    weeks
                )))
            }
        };

        let method = match &self.method {
            None => config.default_method,
            Some(name) => name.parse()?,
        };

        Ok((horizon, method))
    }
}

/// Successful response body
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: ForecastResult,
}

impl From<ForecastResult> for ForecastResponse {
    fn from(result: ForecastResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// Parse a JSON request, forecast it and return the JSON response
pub fn create_forecast_api<P: HistoryProvider>(
    forecaster: &DemandForecaster<P>,
    request_json: &str,
) -> Result<String> {
    let request: ForecastRequest = serde_json::from_str(request_json)?;
    let result = forecaster.forecast(&request)?;
    Ok(serde_json::to_string(&ForecastResponse::from(result))?)
}
