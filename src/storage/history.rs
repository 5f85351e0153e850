//! Ride history store: JSON persistence and deduplicating merge.
//!
//! The history is a flat, ordered list of records. Each run loads the
//! most recently modified history file, merges the newly ingested
//! records into it, and writes the union back under a name derived
//! from the latest ride date.

use crate::activity::ActivityRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The full ordered collection of rides accumulated across runs.
///
/// Serializes as a flat JSON array of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalStore {
    records: Vec<ActivityRecord>,
}

impl HistoricalStore {
    /// Build a store from records, keeping their order.
    pub fn new(records: Vec<ActivityRecord>) -> Self {
        Self { records }
    }

    /// The stored records, oldest-first in insertion order.
    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ordered union of this store and a batch of new records.
    ///
    /// New records append after the existing ones; a record equal to an
    /// earlier one, field for field, is dropped. The comparison covers
    /// every field deliberately (two genuinely distinct rides with
    /// identical sensor data would collapse, which is accepted).
    pub fn merge(&self, new_records: &[ActivityRecord]) -> HistoricalStore {
        let mut merged: Vec<ActivityRecord> =
            Vec::with_capacity(self.records.len() + new_records.len());

        for record in self.records.iter().chain(new_records.iter()) {
            if !merged.contains(record) {
                merged.push(record.clone());
            }
        }

        HistoricalStore { records: merged }
    }

    /// Earliest and latest ride dates present in the store.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(ActivityRecord::naive_date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d))))
    }

    /// Full reporting span: earliest through latest ride date, or the
    /// five years up to `today` when the store holds nothing dated.
    pub fn reporting_span(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        self.date_span()
            .unwrap_or_else(|| (today - chrono::Duration::days(365 * 5), today))
    }
}

impl From<Vec<ActivityRecord>> for HistoricalStore {
    fn from(records: Vec<ActivityRecord>) -> Self {
        Self::new(records)
    }
}

/// History persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History parse error: {0}")]
    Parse(String),

    #[error("History serialize error: {0}")]
    Serialize(String),

    #[error("History has no dated records")]
    NoDates,
}

/// Load the most recently modified history file in the data directory.
///
/// No history files (or no directory yet) yields an empty store.
pub fn load_latest(data_dir: &Path) -> Result<HistoricalStore, StoreError> {
    match latest_json_file(data_dir)? {
        Some(path) => load_file(&path),
        None => {
            tracing::info!("No history files in {:?}, starting empty", data_dir);
            Ok(HistoricalStore::default())
        }
    }
}

/// Load a history file.
pub fn load_file(path: &Path) -> Result<HistoricalStore, StoreError> {
    let content = std::fs::read_to_string(path)?;
    let store: HistoricalStore = serde_json::from_str(&content)
        .map_err(|e| StoreError::Parse(format!("{}: {}", path.display(), e)))?;

    tracing::info!("Loaded {} records from {:?}", store.len(), path);
    Ok(store)
}

/// Write the store to `HL_Summary_<YYYYMMDD>.json` in the data
/// directory, `<YYYYMMDD>` being the latest ride date present.
pub fn save(store: &HistoricalStore, data_dir: &Path) -> Result<PathBuf, StoreError> {
    let (_, max_date) = store.date_span().ok_or(StoreError::NoDates)?;
    let path = data_dir.join(format!("HL_Summary_{}.json", max_date.format("%Y%m%d")));

    std::fs::create_dir_all(data_dir)?;
    let content =
        serde_json::to_string_pretty(store).map_err(|e| StoreError::Serialize(e.to_string()))?;
    std::fs::write(&path, content)?;

    tracing::info!("Wrote {} records to {:?}", store.len(), path);
    Ok(path)
}

fn latest_json_file(data_dir: &Path) -> Result<Option<PathBuf>, StoreError> {
    let entries = match std::fs::read_dir(data_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::Io(e)),
    };

    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if !is_json || !path.is_file() {
            continue;
        }

        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::warn!("Skipping unreadable history file {:?}: {}", path, e);
                continue;
            }
        };

        // Ties break toward the later path so reruns are deterministic.
        let candidate = (modified, path);
        newest = match newest {
            Some(current) if current >= candidate => Some(current),
            _ => Some(candidate),
        };
    }

    Ok(newest.map(|(_, path)| path))
}
