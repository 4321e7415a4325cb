//! Seasonal decomposition over a fixed 13-week cycle

use crate::data::HistoryRecord;
use crate::error::{ForecastError, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Number of positions in one seasonal cycle
pub const CYCLE_LENGTH: usize = 13;

/// Label of a 0-based cycle position, `W1`..`W13`
pub fn position_label(position: usize) -> String {
    format!("W{}", position % CYCLE_LENGTH + 1)
}

/// Normalized multiplicative factor per cycle position.
///
/// Entries keep the order in which their position first appeared in the
/// history; strategies index into that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeasonalFactors {
    entries: Vec<(usize, f64)>,
}

impl SeasonalFactors {
    /// Build from `(position, factor)` pairs, positions 0-based
    pub fn from_entries(entries: Vec<(usize, f64)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every cycle position is represented
    pub fn is_complete(&self) -> bool {
        self.entries.len() == CYCLE_LENGTH
    }

    /// Factor stored under a `W1`..`W13` label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(position, _)| position_label(*position) == label)
            .map(|(_, factor)| *factor)
    }

    /// Factor of the cycle position a 1-based week number falls on
    pub fn for_period(&self, period_index: usize) -> Option<f64> {
        let position = period_index % CYCLE_LENGTH;
        self.entries
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, factor)| *factor)
    }

    /// Factor at `index` in stored order, wrapping over the available entries
    pub fn at(&self, index: usize) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries[index % self.entries.len()].1)
    }

    /// Labels and factors in stored order
    pub fn iter(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.entries
            .iter()
            .map(|(position, factor)| (position_label(*position), *factor))
    }

    /// Arithmetic mean of the stored factors
    pub fn mean(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries.iter().map(|(_, f)| f).sum::<f64>() / self.entries.len() as f64)
    }
}

impl Serialize for SeasonalFactors {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, factor) in self.iter() {
            map.serialize_entry(&label, &factor)?;
        }
        map.end()
    }
}

/// Averages demand per cycle position and normalizes the averages to mean 1
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonalDecomposer;

impl SeasonalDecomposer {
    pub fn new() -> Self {
        Self
    }

    /// Derive seasonal factors from `history`.
    ///
    /// Records are grouped by `week % 13`. Positions absent from history are
    /// left out of the map. An all-zero history maps every present position
    /// to 1.0.
    pub fn decompose(&self, history: &[HistoryRecord]) -> Result<SeasonalFactors> {
        if history.is_empty() {
            return Err(ForecastError::InsufficientData(
                "Seasonal decomposition needs at least one record".to_string(),
            ));
        }

        // (position, sum, count) in first-appearance order
        let mut groups: Vec<(usize, f64, usize)> = Vec::with_capacity(CYCLE_LENGTH);
        let mut slot: [Option<usize>; CYCLE_LENGTH] = [None; CYCLE_LENGTH];

        for record in history {
            let position = record.period_index as usize % CYCLE_LENGTH;
            match slot[position] {
                Some(i) => {
                    groups[i].1 += record.quantity;
                    groups[i].2 += 1;
                }
                None => {
                    slot[position] = Some(groups.len());
                    groups.push((position, record.quantity, 1));
                }
            }
        }

        let means: Vec<(usize, f64)> = groups
            .into_iter()
            .map(|(position, sum, count)| (position, sum / count as f64))
            .collect();

        let total: f64 = means.iter().map(|(_, m)| m).sum();
        let entries = if total > 0.0 {
            let scale = total / CYCLE_LENGTH as f64;
            means.into_iter().map(|(p, m)| (p, m / scale)).collect()
        } else {
            means.into_iter().map(|(p, _)| (p, 1.0)).collect()
        };

        let factors = SeasonalFactors::from_entries(entries);
        if !factors.is_complete() {
            debug!(
                positions = factors.len(),
                "History covers only part of the seasonal cycle"
            );
        }

        Ok(factors)
    }
}
