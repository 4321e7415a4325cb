//! Utility functions for the demand_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};

/// `date` shifted by `weeks` (negative goes back), or `None` outside the calendar range
pub fn shift_weeks(date: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    Duration::try_weeks(weeks).and_then(|delta| date.checked_add_signed(delta))
}

/// `horizon` weekly dates, the first one week after `origin`
pub fn future_period_dates(origin: NaiveDate, horizon: usize) -> Result<Vec<NaiveDate>> {
    let last = i64::try_from(horizon).ok().and_then(|weeks| shift_weeks(origin, weeks));
    if last.is_none() {
        return Err(out_of_range(origin, horizon));
    }

    (1..=horizon)
        .map(|step| {
            i64::try_from(step)
                .ok()
                .and_then(|weeks| shift_weeks(origin, weeks))
                .ok_or_else(|| out_of_range(origin, horizon))
        })
        .collect()
}

pub(crate) fn out_of_range(origin: NaiveDate, weeks: usize) -> ForecastError {
    ForecastError::InvalidParameter(format!(
        "{} weeks from {} is outside the supported date range",
        weeks, origin
    ))
}

/// Round a quantity to whole units
pub fn round_units(value: f64) -> f64 {
    value.round()
}
