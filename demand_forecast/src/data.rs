//! Historical demand records and the providers that load them

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Origin of a history record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    /// Observed demand
    #[default]
    Actual,
}

/// One week of observed demand for an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Calendar date of the period
    pub date: NaiveDate,
    /// 1-based week number within the loaded history
    #[serde(rename = "week")]
    pub period_index: u32,
    /// Demanded quantity, never negative
    pub quantity: f64,
    /// Seasonal factor the record was generated with (informational)
    #[serde(default = "default_seasonal_factor")]
    pub seasonal_factor: f64,
    #[serde(rename = "type", default)]
    pub kind: RecordKind,
}

fn default_seasonal_factor() -> f64 {
    1.0
}

impl HistoryRecord {
    /// Create an actual-demand record
    pub fn new(date: NaiveDate, period_index: u32, quantity: f64) -> Result<Self> {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(ForecastError::DataError(format!(
                "Quantity must be a non-negative number, got {} for week {}",
                quantity, period_index
            )));
        }
        if period_index == 0 {
            return Err(ForecastError::DataError(
                "Week numbers are 1-based".to_string(),
            ));
        }

        Ok(Self {
            date,
            period_index,
            quantity,
            seasonal_factor: 1.0,
            kind: RecordKind::Actual,
        })
    }

    /// Attach the seasonal factor used when the record was produced
    pub fn with_seasonal_factor(mut self, seasonal_factor: f64) -> Self {
        self.seasonal_factor = seasonal_factor;
        self
    }
}

/// Quantities of a history slice, in order
pub fn quantities(history: &[HistoryRecord]) -> Vec<f64> {
    history.iter().map(|r| r.quantity).collect()
}

/// Source of chronological history for an item.
///
/// Implementations are read-only and may be shared between concurrent callers.
pub trait HistoryProvider: Send + Sync {
    /// Load at most `periods` of the most recent records for `material_id`
    fn load(&self, material_id: &str, periods: usize) -> Result<Vec<HistoryRecord>>;
}

impl<P: HistoryProvider + ?Sized> HistoryProvider for &P {
    fn load(&self, material_id: &str, periods: usize) -> Result<Vec<HistoryRecord>> {
        (**self).load(material_id, periods)
    }
}

impl<P: HistoryProvider + ?Sized> HistoryProvider for Box<P> {
    fn load(&self, material_id: &str, periods: usize) -> Result<Vec<HistoryRecord>> {
        (**self).load(material_id, periods)
    }
}

/// History held in memory, keyed by material id
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    series: HashMap<String, Vec<HistoryRecord>>,
}

impl InMemoryHistory {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the history of one material, replacing any previous series
    pub fn insert(&mut self, material_id: impl Into<String>, mut records: Vec<HistoryRecord>) {
        records.sort_by_key(|r| (r.date, r.period_index));
        self.series.insert(material_id.into(), records);
    }

    /// Builder-style variant of [`InMemoryHistory::insert`]
    pub fn with_series(mut self, material_id: impl Into<String>, records: Vec<HistoryRecord>) -> Self {
        self.insert(material_id, records);
        self
    }

    /// Material ids with registered history
    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of materials held
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no material has history
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl HistoryProvider for InMemoryHistory {
    fn load(&self, material_id: &str, periods: usize) -> Result<Vec<HistoryRecord>> {
        let records = self.series.get(material_id).ok_or_else(|| {
            ForecastError::InsufficientData(format!("No history for material {}", material_id))
        })?;

        let start = records.len().saturating_sub(periods);
        Ok(records[start..].to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    material_id: String,
    date: NaiveDate,
    week: u32,
    quantity: f64,
    #[serde(default)]
    seasonal_factor: Option<f64>,
}

/// History loaded from a CSV file with the columns
/// `material_id,date,week,quantity[,seasonal_factor]`
#[derive(Debug, Clone)]
pub struct CsvHistoryProvider {
    inner: InMemoryHistory,
}

impl CsvHistoryProvider {
    /// Read and validate every row of the file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let provider = Self::from_reader(file)?;
        debug!(
            path = %path.as_ref().display(),
            materials = provider.inner.len(),
            "Loaded CSV history"
        );
        Ok(provider)
    }

    /// Read history from any CSV source
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut grouped: HashMap<String, Vec<HistoryRecord>> = HashMap::new();
        for row in csv_reader.deserialize() {
            let row: CsvRow = row?;
            let record = HistoryRecord::new(row.date, row.week, row.quantity)?
                .with_seasonal_factor(row.seasonal_factor.unwrap_or(1.0));
            grouped.entry(row.material_id).or_default().push(record);
        }

        let mut inner = InMemoryHistory::new();
        for (material_id, records) in grouped {
            inner.insert(material_id, records);
        }

        Ok(Self { inner })
    }

    /// Materials found in the file
    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.inner.materials()
    }
}

impl HistoryProvider for CsvHistoryProvider {
    fn load(&self, material_id: &str, periods: usize) -> Result<Vec<HistoryRecord>> {
        self.inner.load(material_id, periods)
    }
}
