use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type};
use arrow::record_batch::RecordBatch;
use arrow::temporal_conversions::date32_to_datetime;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::filter::parse_date;
use super::model::{Record, WasteDataset};

pub const BUILDING: &str = "Building";
pub const STREAM: &str = "Stream";
pub const DATE: &str = "Date";
pub const WEIGHT: &str = "Weight";
pub const VOLUME: &str = "Volume";

/// Columns every source must carry. Others are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [BUILDING, STREAM, DATE, WEIGHT, VOLUME];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a waste dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the required columns (recommended)
/// * `.json`    – `[{ "Building": ..., "Stream": ..., "Date": ..., ... }, ...]`
/// * `.parquet` – the required columns with string/date/numeric types
pub fn load_file(path: &Path) -> Result<WasteDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "txt" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    let blanks = dataset
        .records
        .iter()
        .filter(|r| r.weight.is_nan() || r.volume.is_nan())
        .count();
    if blanks > 0 {
        log::warn!("{blanks} record(s) have a blank Weight or Volume; excluded from statistics");
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row before type coercion. Extra columns are skipped by serde.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Building")]
    building: String,
    #[serde(rename = "Stream")]
    stream: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Weight")]
    weight: String,
    #[serde(rename = "Volume")]
    volume: String,
}

fn load_csv(path: &Path) -> Result<WasteDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(Record {
            building: raw.building,
            stream: raw.stream,
            date: coerce_date(&raw.date, row_no)?,
            weight: coerce_number(&raw.weight, row_no, WEIGHT)?,
            volume: coerce_number(&raw.volume, row_no, VOLUME)?,
        });
    }

    Ok(WasteDataset::from_records(records))
}

fn coerce_date(s: &str, row: usize) -> Result<NaiveDate, LoadError> {
    parse_date(s).map_err(|_| LoadError::InvalidDate {
        row,
        value: s.to_string(),
    })
}

/// Blank cells become `NaN` (a missing value); anything else must parse.
fn coerce_number(s: &str, row: usize, column: &'static str) -> Result<f64, LoadError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
        row,
        column,
        value: s.to_string(),
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Building": "Library", "Stream": "Landfill", "Date": "2023-02-01",
///     "Weight": 5.0, "Volume": 1.0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<WasteDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let field = |column: &'static str| obj.get(column).ok_or(LoadError::MissingColumn(column));

        let date_text = json_text(field(DATE)?, i, DATE)?;
        records.push(Record {
            building: json_text(field(BUILDING)?, i, BUILDING)?,
            stream: json_text(field(STREAM)?, i, STREAM)?,
            date: coerce_date(&date_text, i)?,
            weight: json_number(field(WEIGHT)?, i, WEIGHT)?,
            volume: json_number(field(VOLUME)?, i, VOLUME)?,
        });
    }

    Ok(WasteDataset::from_records(records))
}

fn json_text(val: &JsonValue, row: usize, column: &'static str) -> Result<String, LoadError> {
    match val {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        _ => Err(LoadError::InvalidText { row, column }),
    }
}

fn json_number(val: &JsonValue, row: usize, column: &'static str) -> Result<f64, LoadError> {
    match val {
        JsonValue::Null => Ok(f64::NAN),
        JsonValue::Number(n) => n.as_f64().ok_or_else(|| LoadError::InvalidNumber {
            row,
            column,
            value: n.to_string(),
        }),
        JsonValue::String(s) => coerce_number(s, row, column),
        other => Err(LoadError::InvalidNumber {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file carrying the required columns.
///
/// Column types are cast with Arrow's cast kernels: text columns to Utf8,
/// `Date` to Date32 (from Date32/Date64/Timestamp/ISO strings) and the
/// numeric columns to Float64. Null numbers become missing values.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<WasteDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    // Checked on the schema so files without row groups are rejected too.
    let schema = builder.schema();
    for column in REQUIRED_COLUMNS {
        if schema.field_with_name(column).is_err() {
            return Err(LoadError::MissingColumn(column).into());
        }
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, records.len(), &mut records)?;
    }

    Ok(WasteDataset::from_records(records))
}

fn append_batch(batch: &RecordBatch, row_offset: usize, out: &mut Vec<Record>) -> Result<()> {
    let buildings = cast_column(batch, BUILDING, &DataType::Utf8)?;
    let streams = cast_column(batch, STREAM, &DataType::Utf8)?;
    let dates = cast_column(batch, DATE, &DataType::Date32)?;
    let weights = cast_column(batch, WEIGHT, &DataType::Float64)?;
    let volumes = cast_column(batch, VOLUME, &DataType::Float64)?;

    let buildings = buildings.as_string::<i32>();
    let streams = streams.as_string::<i32>();
    let dates = dates.as_primitive::<Date32Type>();
    let weights = weights.as_primitive::<Float64Type>();
    let volumes = volumes.as_primitive::<Float64Type>();

    for i in 0..batch.num_rows() {
        let row = row_offset + i;
        if buildings.is_null(i) {
            return Err(LoadError::InvalidText { row, column: BUILDING }.into());
        }
        if streams.is_null(i) {
            return Err(LoadError::InvalidText { row, column: STREAM }.into());
        }
        let date = (!dates.is_null(i))
            .then(|| date32_to_datetime(dates.value(i)))
            .flatten()
            .map(|dt| dt.date())
            .ok_or_else(|| LoadError::InvalidDate {
                row,
                value: "null".to_string(),
            })?;

        out.push(Record {
            building: buildings.value(i).to_string(),
            stream: streams.value(i).to_string(),
            date,
            weight: weights.is_valid(i).then(|| weights.value(i)).unwrap_or(f64::NAN),
            volume: volumes.is_valid(i).then(|| volumes.value(i)).unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

fn cast_column(batch: &RecordBatch, column: &'static str, to: &DataType) -> Result<ArrayRef> {
    let array = batch
        .column_by_name(column)
        .ok_or(LoadError::MissingColumn(column))?;
    cast(array, to).map_err(|_| {
        LoadError::UnsupportedColumnType {
            column,
            data_type: array.data_type().to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn load_error(err: &anyhow::Error) -> Option<&LoadError> {
        err.chain().find_map(|e| e.downcast_ref::<LoadError>())
    }

    #[test]
    fn test_load_csv_with_extra_columns() {
        let file = write_temp(
            ".csv",
            "Building,Stream,Substream,Date,Weight,Volume\n\
             Facilities,Recycling,Mixed,2023-01-01,10,2\n\
             Library,Landfill,,2/1/2023,5.5,1\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].date, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(ds.records[1].weight, 5.5);
        assert_eq!(ds.buildings, vec!["Facilities", "Library"]);
    }

    #[test]
    fn test_load_csv_blank_number_is_missing() {
        let file = write_temp(
            ".csv",
            "Building,Stream,Date,Weight,Volume\nFacilities,Recycling,2023-01-01,,2\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert!(ds.records[0].weight.is_nan());
        assert_eq!(ds.records[0].volume, 2.0);
    }

    #[test]
    fn test_load_csv_missing_column() {
        let file = write_temp(
            ".csv",
            "Building,Stream,Date,Weight\nFacilities,Recycling,2023-01-01,10\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(load_error(&err), Some(&LoadError::MissingColumn(VOLUME)));
    }

    #[test]
    fn test_load_csv_bad_date() {
        let file = write_temp(
            ".csv",
            "Building,Stream,Date,Weight,Volume\nFacilities,Recycling,someday,10,2\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::InvalidDate {
                row: 0,
                value: "someday".to_string()
            })
        );
    }

    #[test]
    fn test_load_csv_bad_number() {
        let file = write_temp(
            ".csv",
            "Building,Stream,Date,Weight,Volume\nFacilities,Recycling,2023-01-01,heavy,2\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            load_error(&err),
            Some(LoadError::InvalidNumber { column: "Weight", .. })
        ));
    }

    #[test]
    fn test_load_json_records() {
        let file = write_temp(
            ".json",
            r#"[
                {"Building": "Facilities", "Stream": "Recycling", "Date": "2023-01-01", "Weight": 10, "Volume": 2.5},
                {"Building": "Library", "Stream": "Landfill", "Date": "2023-02-01", "Weight": null, "Volume": "1"}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].weight, 10.0);
        assert!(ds.records[1].weight.is_nan());
        assert_eq!(ds.records[1].volume, 1.0);
    }

    #[test]
    fn test_load_json_missing_column() {
        let file = write_temp(
            ".json",
            r#"[{"Building": "Facilities", "Stream": "Recycling", "Weight": 1, "Volume": 1}]"#,
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(load_error(&err), Some(&LoadError::MissingColumn(DATE)));
    }

    #[test]
    fn test_load_parquet_casts_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(BUILDING, DataType::Utf8, false),
            Field::new(STREAM, DataType::Utf8, false),
            Field::new(DATE, DataType::Date32, false),
            Field::new(WEIGHT, DataType::Int64, true),
            Field::new(VOLUME, DataType::Float64, true),
        ]));
        // 19358 days after 1970-01-01 is 2023-01-01.
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Facilities", "Library"])),
                Arc::new(StringArray::from(vec!["Recycling", "Landfill"])),
                Arc::new(Date32Array::from(vec![19358, 19389])),
                Arc::new(Int64Array::from(vec![Some(10), None])),
                Arc::new(Float64Array::from(vec![2.0, 1.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(ds.records[1].date, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(ds.records[0].weight, 10.0);
        assert!(ds.records[1].weight.is_nan());
    }

    #[test]
    fn test_load_parquet_missing_column() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(BUILDING, DataType::Utf8, false),
            Field::new(STREAM, DataType::Utf8, false),
            Field::new(DATE, DataType::Date32, false),
            Field::new(WEIGHT, DataType::Float64, true),
        ]));
        // No rows at all: the reader yields no batches.
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.close().unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert_eq!(load_error(&err), Some(&LoadError::MissingColumn(VOLUME)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::UnsupportedExtension("xlsx".to_string()))
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_file(Path::new("/definitely/not/here.csv")).is_err());
    }
}
