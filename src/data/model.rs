use std::collections::HashSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single waste measurement.
///
/// `weight` and `volume` are `NaN` when the source cell was blank; such
/// values are skipped by the statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub building: String,
    pub stream: String,
    pub date: NaiveDate,
    pub weight: f64,
    pub volume: f64,
}

// ---------------------------------------------------------------------------
// WasteDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset plus the category domains used by the filters.
#[derive(Debug, Clone, Default)]
pub struct WasteDataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Distinct buildings in first-appearance order.
    pub buildings: Vec<String>,
    /// Distinct streams in first-appearance order.
    pub streams: Vec<String>,
}

impl WasteDataset {
    /// Build the category domains from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let buildings = distinct_in_order(records.iter().map(|r| r.building.as_str()));
        let streams = distinct_in_order(records.iter().map(|r| r.stream.as_str()));
        WasteDataset {
            records,
            buildings,
            streams,
        }
    }

    /// Earliest and latest `Date`, or `None` for an empty dataset.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
