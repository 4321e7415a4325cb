use chrono::NaiveDate;
use demand_forecast::synthetic::SyntheticHistory;
use demand_forecast::{DemandForecaster, ForecastConfig, ForecastMethod, ForecastRequest};
use std::collections::BTreeMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Method Comparison");
    println!("==================================\n");

    let origin = NaiveDate::from_ymd_opt(2024, 7, 1).ok_or("invalid origin")?;
    let forecaster =
        DemandForecaster::new(SyntheticHistory::new(origin), ForecastConfig::default())?
            .with_origin(origin);

    let mut requests = BTreeMap::new();
    for material in ["MED-MOTOR-001", "IMP-VALVE-7", "RAW-STEEL-9"] {
        for method in ForecastMethod::ALL {
            requests.insert(
                format!("{material}/{method}"),
                ForecastRequest::new(material).with_weeks(8).with_method(method),
            );
        }
    }

    for (key, result) in forecaster.forecast_batch(&requests) {
        match result {
            Ok(result) => {
                println!(
                    "{key}: trend {:.3}, accuracy {:.1}%, {} anomalies",
                    result.trend_factor,
                    result.accuracy * 100.0,
                    result.anomalies.len()
                );
                for (point, interval) in result.forecasts.iter().zip(&result.confidence_intervals) {
                    println!(
                        "  W{:>2} {}  {:>6.0}  [{:.0}, {:.0}]",
                        point.period_index, point.date, point.quantity, interval.lower, interval.upper
                    );
                }
            }
            Err(err) => println!("{key}: failed: {err}"),
        }
    }

    let first = forecaster.forecast(&ForecastRequest::new("MED-MOTOR-001").with_weeks(4))?;
    println!("\nJSON response:\n{}", serde_json::to_string_pretty(&first)?);

    Ok(())
}
