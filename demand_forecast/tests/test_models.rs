use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate};
use demand_forecast::error::ForecastError;
use demand_forecast::models::{ExponentialSmoothing, MovingAverage, SeasonalComposite};
use demand_forecast::{
    ForecastConfig, ForecastMethod, ForecastStrategy, HistoryRecord, SeasonalDecomposer,
    SeasonalFactors, SeasonalIndexing,
};
use rstest::rstest;

fn origin() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

fn history(quantities: &[f64]) -> Vec<HistoryRecord> {
    let start = origin() - Duration::weeks(quantities.len() as i64);
    quantities
        .iter()
        .enumerate()
        .map(|(i, &q)| HistoryRecord::new(start + Duration::weeks(i as i64), i as u32 + 1, q).unwrap())
        .collect()
}

/// Factor 1.0 + 0.1·position for every position, stored in position order
fn graded_factors() -> SeasonalFactors {
    SeasonalFactors::from_entries((0..13).map(|p| (p, 1.0 + 0.1 * p as f64)).collect())
}

/// Factor 1.5 at stored index 4, 1.0 elsewhere
fn peaked_factors() -> SeasonalFactors {
    SeasonalFactors::from_entries(
        (0..13)
            .map(|p| (p, if p == 4 { 1.5 } else { 1.0 }))
            .collect(),
    )
}

fn strategy(method: ForecastMethod) -> Box<dyn ForecastStrategy> {
    method.strategy(&ForecastConfig::default()).unwrap()
}

#[rstest]
#[case(ForecastMethod::MovingAverage, 1)]
#[case(ForecastMethod::MovingAverage, 13)]
#[case(ForecastMethod::ExponentialSmoothing, 4)]
#[case(ForecastMethod::ExponentialSmoothing, 26)]
#[case(ForecastMethod::Seasonal, 7)]
#[case(ForecastMethod::Seasonal, 52)]
fn test_horizon_points_are_weekly(#[case] method: ForecastMethod, #[case] horizon: usize) {
    let records = history(&(0..52).map(|i| 100.0 + (i % 13) as f64 * 5.0).collect::<Vec<_>>());
    let factors = SeasonalDecomposer::new().decompose(&records).unwrap();

    let points = strategy(method).generate(&records, &factors, horizon, origin()).unwrap();

    assert_eq!(points.len(), horizon);
    assert_eq!(points[0].date, origin() + Duration::weeks(1));
    for (step, point) in points.iter().enumerate() {
        assert_eq!(point.period_index, step as u32 + 1);
        assert_eq!(point.date, origin() + Duration::weeks(step as i64 + 1));
        assert_eq!(point.method, method);
        assert!(point.quantity >= 0.0);
        assert_eq!(point.quantity, point.quantity.round());
    }
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::ExponentialSmoothing)]
#[case(ForecastMethod::Seasonal)]
fn test_constant_history_forecasts_constant(#[case] method: ForecastMethod) {
    let records = history(&[100.0; 52]);
    let factors = SeasonalDecomposer::new().decompose(&records).unwrap();

    let values = strategy(method).project(&records, &factors, 4).unwrap();

    assert_eq!(values.len(), 4);
    for value in values {
        assert_relative_eq!(value, 100.0, epsilon = 1e-9);
    }
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::ExponentialSmoothing)]
#[case(ForecastMethod::Seasonal)]
fn test_zero_horizon_is_empty(#[case] method: ForecastMethod) {
    let factors = graded_factors();
    let points = strategy(method).generate(&[], &factors, 0, origin()).unwrap();
    assert!(points.is_empty());

    let records = history(&[10.0, 20.0]);
    assert!(strategy(method).generate(&records, &factors, 0, origin()).unwrap().is_empty());
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::ExponentialSmoothing)]
#[case(ForecastMethod::Seasonal)]
fn test_empty_history_is_insufficient(#[case] method: ForecastMethod) {
    let result = strategy(method).generate(&[], &graded_factors(), 3, origin());
    assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::ExponentialSmoothing)]
#[case(ForecastMethod::Seasonal)]
fn test_empty_factors_are_insufficient(#[case] method: ForecastMethod) {
    let records = history(&[10.0, 20.0]);
    let result = strategy(method).project(&records, &SeasonalFactors::default(), 3);
    assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
}

#[test]
fn test_moving_average_folds_forecasts_back() {
    // level 25, static index 4 % 13 = 4 -> factor 1.5
    let records = history(&[10.0, 20.0, 30.0, 40.0]);
    let model = MovingAverage::new(4).unwrap();

    let values = model.project(&records, &peaked_factors(), 3).unwrap();
    assert_relative_eq!(values[0], 37.5, epsilon = 1e-9);
    assert_relative_eq!(values[1], 41.25, epsilon = 1e-9);
    assert_relative_eq!(values[2], 45.375, epsilon = 1e-9);

    let points = model.generate(&records, &peaked_factors(), 3, origin()).unwrap();
    let quantities: Vec<f64> = points.iter().map(|p| p.quantity).collect();
    assert_eq!(quantities, vec![38.0, 41.0, 45.0]);
}

#[test]
fn test_moving_average_uses_trailing_window() {
    let records = history(&[1000.0, 1000.0, 10.0, 20.0, 30.0, 40.0]);
    let flat = SeasonalFactors::from_entries((0..13).map(|p| (p, 1.0)).collect());

    let values = MovingAverage::new(4).unwrap().project(&records, &flat, 1).unwrap();
    assert_relative_eq!(values[0], 25.0, epsilon = 1e-9);
}

#[test]
fn test_exponential_smoothing_settles_on_level() {
    // level starts at the mean (25) and feeding the forecast back keeps it there
    let records = history(&[10.0, 20.0, 30.0, 40.0]);
    let values = ExponentialSmoothing::default()
        .project(&records, &peaked_factors(), 5)
        .unwrap();

    for value in values {
        assert_relative_eq!(value, 37.5, epsilon = 1e-9);
    }
}

#[test]
fn test_seasonal_composite_recursion() {
    // mean 25, trend 1 + 10/25 = 1.4, factor 1.5
    let records = history(&[10.0, 20.0, 30.0, 40.0]);
    let values = SeasonalComposite::default()
        .project(&records, &peaked_factors(), 3)
        .unwrap();

    assert_relative_eq!(values[0], 52.5, epsilon = 1e-9);
    assert_relative_eq!(values[1], 58.8, epsilon = 1e-9);
    assert_relative_eq!(values[2], 65.856, epsilon = 1e-9);
}

#[test]
fn test_static_indexing_holds_one_factor() {
    let records = history(&[10.0, 20.0, 30.0, 40.0]);
    let values = ExponentialSmoothing::default()
        .project(&records, &graded_factors(), 4)
        .unwrap();

    // index 4 -> 1.4 for every step
    for value in values {
        assert_relative_eq!(value, 35.0, epsilon = 1e-9);
    }
}

#[test]
fn test_advancing_indexing_follows_calendar() {
    // last week is 4, so steps land on weeks 5, 6, 7, 8
    let records = history(&[10.0, 20.0, 30.0, 40.0]);
    let values = ExponentialSmoothing::default()
        .with_indexing(SeasonalIndexing::Advancing)
        .project(&records, &graded_factors(), 4)
        .unwrap();

    let expected = [37.5, 40.0, 42.5, 45.0];
    for (value, expected) in values.iter().zip(expected) {
        assert_relative_eq!(*value, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_partial_factors_wrap() {
    // 5 records -> static index 5, wrapped over 3 entries -> entry 2
    let records = history(&[10.0, 10.0, 10.0, 10.0, 10.0]);
    let factors = SeasonalFactors::from_entries(vec![(1, 0.5), (2, 1.0), (3, 2.0)]);

    let values = ExponentialSmoothing::default().project(&records, &factors, 2).unwrap();
    assert_relative_eq!(values[0], 20.0, epsilon = 1e-9);
    assert_relative_eq!(values[1], 20.0, epsilon = 1e-9);
}

#[test]
fn test_zero_factor_does_not_poison_level() {
    let records = history(&[10.0, 20.0, 30.0, 40.0]);
    let factors = SeasonalFactors::from_entries((0..13).map(|p| (p, 0.0)).collect());

    for method in ForecastMethod::ALL {
        let values = strategy(method).project(&records, &factors, 3).unwrap();
        assert!(values.iter().all(|v| *v == 0.0));
    }
}

#[rstest]
#[case("ma", ForecastMethod::MovingAverage)]
#[case("ETS", ForecastMethod::ExponentialSmoothing)]
#[case(" seasonal ", ForecastMethod::Seasonal)]
fn test_method_from_str(#[case] name: &str, #[case] expected: ForecastMethod) {
    assert_eq!(name.parse::<ForecastMethod>().unwrap(), expected);
}

#[test]
fn test_unknown_method_is_invalid() {
    assert!(matches!(
        "arima".parse::<ForecastMethod>(),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_method_tags() {
    assert_eq!(ForecastMethod::MovingAverage.tag(), "MA");
    assert_eq!(ForecastMethod::ExponentialSmoothing.tag(), "ETS");
    assert_eq!(ForecastMethod::Seasonal.tag(), "SEASONAL");
    assert_eq!(ForecastMethod::default(), ForecastMethod::Seasonal);
}

#[test]
fn test_model_parameter_validation() {
    assert!(MovingAverage::new(0).is_err());
    assert!(ExponentialSmoothing::new(1.5, 0.1, 0.2).is_err());
    assert!(ExponentialSmoothing::new(0.3, 0.0, 0.2).is_err());
    assert!(SeasonalComposite::new(0.0).is_err());

    let model = ExponentialSmoothing::new(0.5, 0.2, 0.1).unwrap();
    assert_eq!(model.alpha(), 0.5);
    assert_eq!(model.gamma(), 0.1);
}
