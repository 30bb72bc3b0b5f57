//! Command line / environment configuration

use std::path::PathBuf;

use clap::Parser;

use crate::data::error::InputError;
use crate::data::filter::{parse_date, FilterCriteria};
use crate::data::model::WasteDataset;

#[derive(Parser, Debug)]
#[command(
    name = "waste-dashboard",
    about = "Interactive dashboard for waste-management data",
    after_help = "\
EXAMPLES:
    waste-dashboard wastedata.csv                         Open the dashboard
    waste-dashboard wastedata.csv --building Library      Start with one building selected
    waste-dashboard wastedata.csv --headless --start 2023-01-01
                                                          Print the summary and exit"
)]
pub struct Args {
    /// Data file (.csv, .json or .parquet) loaded at startup
    #[arg(value_name = "DATA", env = "WASTE_DATA")]
    pub data: Option<PathBuf>,

    /// Initial start date (YYYY-MM-DD); defaults to the earliest date
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Initial end date (YYYY-MM-DD); defaults to the latest date
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,

    /// Initially selected building (repeatable); defaults to all
    #[arg(long = "building", value_name = "NAME")]
    pub buildings: Vec<String>,

    /// Initially selected stream (repeatable); defaults to all
    #[arg(long = "stream", value_name = "NAME")]
    pub streams: Vec<String>,

    /// Print the filtered summary to stdout instead of opening a window
    #[arg(long, requires = "data")]
    pub headless: bool,
}

impl Args {
    /// Starting criteria: the full domain narrowed by whatever was given.
    pub fn initial_criteria(&self, dataset: &WasteDataset) -> Result<FilterCriteria, InputError> {
        let mut criteria = FilterCriteria::full_domain(dataset);
        if let Some(start) = &self.start {
            criteria.start = parse_date(start)?;
        }
        if let Some(end) = &self.end {
            criteria.end = parse_date(end)?;
        }
        if !self.buildings.is_empty() {
            criteria.buildings = self.buildings.iter().cloned().collect();
        }
        if !self.streams.is_empty() {
            criteria.streams = self.streams.iter().cloned().collect();
        }
        Ok(criteria)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::Record;

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
    fn test_defaults_to_full_domain() {
        let args = Args::parse_from(["waste-dashboard", "data.csv"]);
        let ds = dataset();
        assert_eq!(args.initial_criteria(&ds).unwrap(), FilterCriteria::full_domain(&ds));
        assert!(!args.headless);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "waste-dashboard",
            "data.csv",
            "--building",
            "Library",
            "--start",
            "2023-01-15",
            "--headless",
        ]);
        let criteria = args.initial_criteria(&dataset()).unwrap();
        assert_eq!(criteria.buildings.len(), 1);
        assert!(criteria.buildings.contains("Library"));
        assert_eq!(criteria.streams.len(), 2);
        assert_eq!(criteria.start, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
        assert_eq!(criteria.end, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert!(args.headless);
    }

    #[test]
    fn test_malformed_date_is_input_error() {
        let args = Args::parse_from(["waste-dashboard", "data.csv", "--end", "soon"]);
        assert_eq!(
            args.initial_criteria(&dataset()),
            Err(InputError::InvalidDate("soon".to_string()))
        );
    }

    #[test]
    fn test_headless_requires_data() {
        assert!(Args::try_parse_from(["waste-dashboard", "--headless"]).is_err());
    }
}
