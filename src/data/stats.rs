use std::collections::HashMap;

use chrono::NaiveDate;

use super::model::Record;

// ---------------------------------------------------------------------------
// Stream distribution
// ---------------------------------------------------------------------------

/// Number of records carrying one stream value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamCount {
    pub stream: String,
    pub count: usize,
}

/// Count records per stream.
///
/// Ordered by count descending; ties keep first-appearance order.
pub fn stream_counts<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<StreamCount> {
    let mut counts: Vec<StreamCount> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for r in records {
        match slot.get(r.stream.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                slot.insert(r.stream.as_str(), counts.len());
                counts.push(StreamCount {
                    stream: r.stream.clone(),
                    count: 1,
                });
            }
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

// ---------------------------------------------------------------------------
// Weight over time
// ---------------------------------------------------------------------------

/// Total weight of one stream on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeight {
    pub date: NaiveDate,
    pub stream: String,
    pub weight: f64,
}

/// Sum `Weight` per (date, stream), ordered by date then stream appearance.
///
/// Missing weights contribute nothing.
pub fn weight_over_time<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<DailyWeight> {
    let mut rows: Vec<DailyWeight> = Vec::new();
    let mut slot: HashMap<(NaiveDate, &str), usize> = HashMap::new();
    let mut stream_rank: HashMap<&str, usize> = HashMap::new();

    for r in records {
        let next_rank = stream_rank.len();
        stream_rank.entry(r.stream.as_str()).or_insert(next_rank);

        let weight = if r.weight.is_nan() { 0.0 } else { r.weight };
        match slot.get(&(r.date, r.stream.as_str())) {
            Some(&i) => rows[i].weight += weight,
            None => {
                slot.insert((r.date, r.stream.as_str()), rows.len());
                rows.push(DailyWeight {
                    date: r.date,
                    stream: r.stream.clone(),
                    weight,
                });
            }
        }
    }

    rows.sort_by_key(|row| (row.date, stream_rank[row.stream.as_str()]));
    rows
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Row labels of the summary table.
pub const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// `describe()`-style statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Describe the non-missing values; `None` when there are none.
    pub fn describe(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let std = (count > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        });

        Some(ColumnStats {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q75: quantile_sorted(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }

    /// Values in [`STAT_LABELS`] order. `None` renders as "NaN".
    pub fn values(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            Some(self.mean),
            self.std,
            Some(self.min),
            Some(self.q25),
            Some(self.median),
            Some(self.q75),
            Some(self.max),
        ]
    }
}

/// Table values for a column; one without any values reads `count = 0`.
pub fn stat_values(stats: Option<&ColumnStats>) -> [Option<f64>; 8] {
    match stats {
        Some(s) => s.values(),
        None => {
            let mut values = [None; 8];
            values[0] = Some(0.0);
            values
        }
    }
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let float_idx = (sorted.len() - 1) as f64 * q;
    let lower = float_idx.floor() as usize;
    let upper = float_idx.ceil() as usize;
    let (lo, hi) = (sorted[lower], sorted[upper]);
    if lo == hi {
        lo
    } else {
        lo + (float_idx - lower as f64) * (hi - lo)
    }
}

/// Statistics of the numeric columns over a non-empty view.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub weight: Option<ColumnStats>,
    pub volume: Option<ColumnStats>,
}

impl Summary {
    pub fn of<'a>(records: impl IntoIterator<Item = &'a Record> + Clone) -> Self {
        Summary {
            weight: ColumnStats::describe(records.clone().into_iter().map(|r| r.weight)),
            volume: ColumnStats::describe(records.into_iter().map(|r| r.volume)),
        }
    }

    /// Column headers paired with their statistics.
    pub fn columns(&self) -> [(&'static str, Option<&ColumnStats>); 2] {
        [
            ("Weight", self.weight.as_ref()),
            ("Volume", self.volume.as_ref()),
        ]
    }
}
