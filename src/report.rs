use std::fmt::{self, Write};

use crate::data::filter::FilterCriteria;
use crate::data::model::WasteDataset;
use crate::data::pipeline::PipelineOutput;
use crate::data::stats::{stat_values, Summary, STAT_LABELS};

pub const NO_DATA: &str = "No data available for the selected filters";

/// Format a statistic the way the summary tables show it.
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.3}"),
        None => "NaN".to_string(),
    }
}

/// Plain-text rendering of the pipeline output, used by `--headless`.
pub fn render(
    dataset: &WasteDataset,
    criteria: &FilterCriteria,
    output: &PipelineOutput,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(
        out,
        "Filter: {} building(s), {} stream(s)",
        criteria.buildings.len(),
        criteria.streams.len()
    )?;
    // An empty dataset has no dates to bound.
    if dataset.date_span().is_some() {
        write!(out, ", {} to {}", criteria.start, criteria.end)?;
    }
    writeln!(out)?;
    writeln!(out, "Records: {} of {}", output.view.len(), dataset.len())?;

    let Some(summary) = &output.summary else {
        writeln!(out, "{NO_DATA}")?;
        return Ok(out);
    };

    writeln!(out, "\nStream distribution")?;
    for c in &output.stream_counts {
        writeln!(out, "  {:<24} {:>8}", c.stream, c.count)?;
    }

    writeln!(out, "\nSummary statistics")?;
    write_summary(&mut out, summary)?;
    Ok(out)
}

fn write_summary(out: &mut String, summary: &Summary) -> fmt::Result {
    let columns = summary.columns();
    write!(out, "  {:<8}", "")?;
    for (name, _) in &columns {
        write!(out, " {name:>14}")?;
    }
    writeln!(out)?;

    for (row, label) in STAT_LABELS.iter().enumerate() {
        write!(out, "  {label:<8}")?;
        for (_, stats) in &columns {
            write!(out, " {:>14}", format_stat(stat_values(*stats)[row]))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::Record;
    use crate::data::pipeline;

    fn dataset() -> WasteDataset {
        WasteDataset::from_records(vec![
            Record {
                building: "Facilities".to_string(),
                stream: "Recycling".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                weight: 10.0,
                volume: 2.0,
            },
            Record {
                building: "Library".to_string(),
                stream: "Landfill".to_string(),
                date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
                weight: 5.0,
                volume: 1.0,
            },
        ])
    }

    #[test]
    fn test_render_summary() {
        let ds = dataset();
        let criteria = FilterCriteria::full_domain(&ds);
        let text = render(&ds, &criteria, &pipeline::run(&ds, &criteria)).unwrap();
        assert!(text.contains("Records: 2 of 2"));
        assert!(text.contains("Recycling"));
        assert!(text.contains("7.500"));
        assert!(text.lines().any(|l| l.trim_start().starts_with("75%")));
    }

    #[test]
    fn test_render_empty() {
        let ds = dataset();
        let criteria = FilterCriteria {
            streams: BTreeSet::new(),
            ..FilterCriteria::full_domain(&ds)
        };
        let text = render(&ds, &criteria, &pipeline::run(&ds, &criteria)).unwrap();
        assert!(text.contains(NO_DATA));
        assert!(!text.contains("Summary statistics"));
    }

    #[test]
    fn test_blank_column_reports_zero_count() {
        let mut ds = dataset();
        for r in &mut ds.records {
            r.weight = f64::NAN;
        }
        let criteria = FilterCriteria::full_domain(&ds);
        let text = render(&ds, &criteria, &pipeline::run(&ds, &criteria)).unwrap();
        let count_line = text
            .lines()
            .find(|l| l.trim_start().starts_with("count"))
            .unwrap();
        let cells: Vec<&str> = count_line.split_whitespace().collect();
        assert_eq!(cells, vec!["count", "0.000", "2.000"]);
        let mean_line = text
            .lines()
            .find(|l| l.trim_start().starts_with("mean"))
            .unwrap();
        assert!(mean_line.contains("NaN"));
    }

    #[test]
    fn test_empty_dataset_has_no_date_range() {
        let ds = WasteDataset::default();
        let criteria = FilterCriteria::full_domain(&ds);
        let text = render(&ds, &criteria, &pipeline::run(&ds, &criteria)).unwrap();
        assert!(text.starts_with("Filter: 0 building(s), 0 stream(s)\n"));
        assert!(!text.contains(" to "));
        assert!(text.contains("Records: 0 of 0"));
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(Some(2.0)), "2.000");
        assert_eq!(format_stat(None), "NaN");
    }
}
