use demand_forecast::error::ForecastError;
use demand_math::MathError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    assert!(matches!(ForecastError::from(io_error), ForecastError::IoError(_)));

    let math_error = MathError::CalculationError("slope undefined".to_string());
    assert!(matches!(ForecastError::from(math_error), ForecastError::Math(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        ForecastError::from(json_error),
        ForecastError::SerializationError(_)
    ));
}

#[test]
fn test_error_display() {
    let error = ForecastError::InvalidParameter("weeks must be positive, got 0".to_string());
    let message = error.to_string();
    assert!(message.contains("Invalid parameter"));
    assert!(message.contains("weeks must be positive"));

    let error = ForecastError::InsufficientData("No history for material X".to_string());
    assert_eq!(error.to_string(), "Insufficient data: No history for material X");

    let error = ForecastError::from(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
    let message = error.to_string();
    assert!(message.contains("IO error"));
    assert!(message.contains("permission denied"));
}
