use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};

use super::error::InputError;
use super::model::{Record, WasteDataset};

// ---------------------------------------------------------------------------
// Filter criteria: selected buildings, streams and an inclusive date range
// ---------------------------------------------------------------------------

/// The categorical columns that carry a multi-select filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Building,
    Stream,
}

impl FilterColumn {
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Building => "Building",
            FilterColumn::Stream => "Stream",
        }
    }
}

/// User-selected constraints narrowing the record set.
///
/// An empty set selects nothing. A range with `start > end` selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub buildings: BTreeSet<String>,
    pub streams: BTreeSet<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FilterCriteria {
    /// Criteria covering every building, every stream and the full date span.
    pub fn full_domain(dataset: &WasteDataset) -> Self {
        let (start, end) = dataset
            .date_span()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        FilterCriteria {
            buildings: dataset.buildings.iter().cloned().collect(),
            streams: dataset.streams.iter().cloned().collect(),
            start,
            end,
        }
    }

    /// Whether a record satisfies all three predicates.
    pub fn matches(&self, record: &Record) -> bool {
        self.buildings.contains(&record.building)
            && self.streams.contains(&record.stream)
            && self.start <= record.date
            && record.date <= self.end
    }

    /// Selected values of one categorical column.
    pub fn selection(&self, column: FilterColumn) -> &BTreeSet<String> {
        match column {
            FilterColumn::Building => &self.buildings,
            FilterColumn::Stream => &self.streams,
        }
    }

    pub fn selection_mut(&mut self, column: FilterColumn) -> &mut BTreeSet<String> {
        match column {
            FilterColumn::Building => &mut self.buildings,
            FilterColumn::Stream => &mut self.streams,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view: indices into the source dataset
// ---------------------------------------------------------------------------

/// The records matching a [`FilterCriteria`], as indices into the dataset.
///
/// Indices are strictly increasing, so source order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    pub indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolve the view against the dataset it was computed from.
    pub fn records<'a>(&'a self, dataset: &'a WasteDataset) -> impl Iterator<Item = &'a Record> + 'a {
        self.indices.iter().map(move |&i| &dataset.records[i])
    }
}

/// Return the view of records that pass `criteria`.
pub fn filter(dataset: &WasteDataset, criteria: &FilterCriteria) -> FilteredView {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect();
    FilteredView { indices }
}

// ---------------------------------------------------------------------------
// Date input parsing
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date typed by the user or read from a source cell.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, `MM/DD/YYYY` and ISO date-times
/// (the time part is dropped).
pub fn parse_date(input: &str) -> Result<NaiveDate, InputError> {
    let s = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| InputError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(building: &str, stream: &str, d: NaiveDate, weight: f64) -> Record {
        Record {
            building: building.to_string(),
            stream: stream.to_string(),
            date: d,
            weight,
            volume: weight / 5.0,
        }
    }

    fn dataset() -> WasteDataset {
        WasteDataset::from_records(vec![
            record("Facilities", "Recycling", date(2023, 1, 1), 10.0),
            record("Library", "Landfill", date(2023, 2, 1), 5.0),
            record("Facilities", "Landfill", date(2023, 3, 15), 7.5),
            record("Dining", "Compost", date(2023, 6, 30), 12.0),
            record("Library", "Recycling", date(2024, 1, 2), 3.0),
        ])
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scenario_single_building() {
        let ds = WasteDataset::from_records(vec![
            record("Facilities", "Recycling", date(2023, 1, 1), 10.0),
            record("Library", "Landfill", date(2023, 2, 1), 5.0),
        ]);
        let criteria = FilterCriteria {
            buildings: set(&["Facilities"]),
            streams: set(&["Recycling", "Landfill"]),
            start: date(2023, 1, 1),
            end: date(2023, 12, 31),
        };
        assert_eq!(filter(&ds, &criteria).indices, vec![0]);
    }

    #[test]
    fn test_full_domain_keeps_everything_in_order() {
        let ds = dataset();
        let view = filter(&ds, &FilterCriteria::full_domain(&ds));
        assert_eq!(view.indices, (0..ds.len()).collect::<Vec<_>>());
        let records: Vec<&Record> = view.records(&ds).collect();
        assert_eq!(records[3].building, "Dining");
    }

    #[test]
    fn test_every_match_satisfies_all_predicates() {
        let ds = dataset();
        let criteria = FilterCriteria {
            buildings: set(&["Facilities", "Library"]),
            streams: set(&["Landfill", "Recycling"]),
            start: date(2023, 1, 15),
            end: date(2023, 12, 31),
        };
        let view = filter(&ds, &criteria);
        assert_eq!(view.indices, vec![1, 2]);
        for r in view.records(&ds) {
            assert!(criteria.buildings.contains(&r.building));
            assert!(criteria.streams.contains(&r.stream));
            assert!(criteria.start <= r.date && r.date <= criteria.end);
        }
        // Non-matches are exactly the rejected rows.
        let rejected = ds
            .records
            .iter()
            .enumerate()
            .filter(|(i, _)| !view.indices.contains(i))
            .all(|(_, r)| !criteria.matches(r));
        assert!(rejected);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ds = dataset();
        let criteria = FilterCriteria {
            buildings: set(&["Library"]),
            ..FilterCriteria::full_domain(&ds)
        };
        assert_eq!(filter(&ds, &criteria), filter(&ds, &criteria));
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let ds = dataset();
        let criteria = FilterCriteria {
            start: date(2023, 2, 1),
            end: date(2023, 3, 15),
            ..FilterCriteria::full_domain(&ds)
        };
        assert_eq!(filter(&ds, &criteria).indices, vec![1, 2]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let ds = dataset();
        let criteria = FilterCriteria {
            start: date(2023, 12, 31),
            end: date(2023, 1, 1),
            ..FilterCriteria::full_domain(&ds)
        };
        assert!(filter(&ds, &criteria).is_empty());
    }

    #[test]
    fn test_empty_selection_selects_nothing() {
        let ds = dataset();
        let mut criteria = FilterCriteria::full_domain(&ds);
        criteria.selection_mut(FilterColumn::Stream).clear();
        assert!(filter(&ds, &criteria).is_empty());
    }

    #[test]
    fn test_full_domain_of_empty_dataset() {
        let ds = WasteDataset::default();
        let criteria = FilterCriteria::full_domain(&ds);
        assert!(criteria.buildings.is_empty());
        assert!(filter(&ds, &criteria).is_empty());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2023-01-05").unwrap(), date(2023, 1, 5));
        assert_eq!(parse_date(" 2023/01/05 ").unwrap(), date(2023, 1, 5));
        assert_eq!(parse_date("1/5/2023").unwrap(), date(2023, 1, 5));
        assert_eq!(parse_date("2023-01-05 13:45:00").unwrap(), date(2023, 1, 5));
        assert_eq!(parse_date("2023-01-05T00:00:00").unwrap(), date(2023, 1, 5));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(
            parse_date("next tuesday"),
            Err(InputError::InvalidDate("next tuesday".to_string()))
        );
        assert!(parse_date("2023-13-01").is_err());
        assert!(parse_date("").is_err());
    }
}
