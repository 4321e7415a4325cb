//! # Demand Forecast Workspace
//!
//! Facade over the workspace crates: [`demand_forecast`] for the forecasting
//! pipeline and [`demand_math`] for the numeric primitives underneath it.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use demand_forecast_workspace::quick_forecast;
//!
//! let origin = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let result = quick_forecast("IMP-VALVE-7", 6, origin).unwrap();
//! assert_eq!(result.forecasts.len(), 6);
//! ```

pub use demand_forecast;
pub use demand_math;

use chrono::NaiveDate;
use demand_forecast::synthetic::SyntheticHistory;
use demand_forecast::{DemandForecaster, ForecastConfig, ForecastRequest, ForecastResult};

/// Forecast `weeks` ahead for `material_id` with default settings and synthetic history
pub fn quick_forecast(
    material_id: &str,
    weeks: i64,
    origin: NaiveDate,
) -> demand_forecast::Result<ForecastResult> {
    let forecaster = DemandForecaster::new(SyntheticHistory::new(origin), ForecastConfig::default())?
        .with_origin(origin);
    forecaster.forecast(&ForecastRequest::new(material_id).with_weeks(weeks))
}
