use chrono::{NaiveDate, Utc};
use clap::Parser;
use demand_forecast::synthetic::SyntheticHistory;
use demand_forecast::{
    init_tracing, CsvHistoryProvider, DemandForecaster, ForecastConfig, ForecastRequest,
    ForecastResponse, HistoryProvider,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Forecast weekly demand for one material and print the result as JSON
#[derive(Debug, Parser)]
#[command(name = "demand-forecast", version, about)]
struct Cli {
    /// Material identifier
    #[arg(short, long)]
    material: String,

    /// Forecast horizon in weeks (defaults to the configured horizon)
    #[arg(short, long)]
    weeks: Option<i64>,

    /// Forecast method: ma, ets or seasonal
    #[arg(long)]
    method: Option<String>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read history from this CSV file instead of generating it
    #[arg(long)]
    history_csv: Option<PathBuf>,

    /// Date treated as "now" (YYYY-MM-DD)
    #[arg(long)]
    origin: Option<NaiveDate>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Pretty-print the response
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ForecastConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load configuration: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging.level, cli.json_logs || config.logging.json);

    match run(&cli, config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Forecast failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: ForecastConfig) -> demand_forecast::Result<String> {
    let origin = cli.origin.unwrap_or_else(|| Utc::now().date_naive());
    let provider: Box<dyn HistoryProvider> = match &cli.history_csv {
        Some(path) => Box::new(CsvHistoryProvider::from_path(path)?),
        None => Box::new(SyntheticHistory::new(origin)),
    };

    let forecaster = DemandForecaster::new(provider, config)?.with_origin(origin);
    let request = ForecastRequest {
        material_id: cli.material.clone(),
        weeks: cli.weeks,
        method: cli.method.clone(),
    };

    let response = ForecastResponse::from(forecaster.forecast(&request)?);
    let output = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(output)
}
