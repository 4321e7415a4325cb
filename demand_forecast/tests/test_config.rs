use demand_forecast::error::ForecastError;
use demand_forecast::{ForecastConfig, ForecastMethod, SeasonalIndexing};
use pretty_assertions::assert_eq;
use std::io::Write;

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn test_defaults_match_model_constants() {
    let config = ForecastConfig::default();

    assert_eq!(config.default_horizon, 13);
    assert_eq!(config.default_method, ForecastMethod::Seasonal);
    assert_eq!(config.history_multiplier, 4);
    assert_eq!(config.moving_average_window, 4);
    assert_eq!(config.level_smoothing, 0.3);
    assert_eq!(config.trend_smoothing, 0.1);
    assert_eq!(config.seasonal_smoothing, 0.2);
    assert_eq!(config.seasonal_indexing, SeasonalIndexing::Static);
    assert_eq!(config.confidence_base, 0.95);
    assert_eq!(config.z_score, 1.96);
    assert_eq!(config.accuracy_fallback, 0.85);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_file_overrides_defaults() {
    let file = toml_file(
        r#"
default_horizon = 8
default_method = "ets"
moving_average_window = 6
seasonal_indexing = "advancing"

[logging]
level = "debug"
json = true
"#,
    );

    let config = ForecastConfig::from_file(file.path()).unwrap();

    assert_eq!(config.default_horizon, 8);
    assert_eq!(config.default_method, ForecastMethod::ExponentialSmoothing);
    assert_eq!(config.moving_average_window, 6);
    assert_eq!(config.seasonal_indexing, SeasonalIndexing::Advancing);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    // untouched keys keep their defaults
    assert_eq!(config.level_smoothing, 0.3);
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let file = toml_file("level_smoothing = 1.5\n");
    assert!(matches!(
        ForecastConfig::from_file(file.path()),
        Err(ForecastError::InvalidParameter(_))
    ));

    let config = ForecastConfig {
        moving_average_window: 0,
        ..ForecastConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_unknown_keys_are_rejected() {
    let file = toml_file("horizon_weeks = 4\n");
    assert!(matches!(
        ForecastConfig::from_file(file.path()),
        Err(ForecastError::Config(_))
    ));
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(ForecastConfig::from_file("no/such/settings.toml").is_err());
}
