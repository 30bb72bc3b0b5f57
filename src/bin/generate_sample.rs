use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Duration, NaiveDate};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One output row; field names match the dashboard's required columns.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Building")]
    building: &'static str,
    #[serde(rename = "Stream")]
    stream: &'static str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Weight")]
    weight: f64,
    #[serde(rename = "Volume")]
    volume: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// (building, activity multiplier)
const BUILDINGS: [(&str, f64); 5] = [
    ("Facilities", 2.0),
    ("Library", 0.8),
    ("Student Union", 1.3),
    ("Engineering", 1.0),
    ("Dining Commons", 1.6),
];

/// (stream, mean pickup weight in lbs, density in lbs per cubic yard)
const STREAMS: [(&str, f64, f64); 5] = [
    ("Recycling", 120.0, 90.0),
    ("Landfill", 150.0, 160.0),
    ("Compost", 80.0, 400.0),
    ("Cardboard", 60.0, 60.0),
    ("E-Waste", 25.0, 200.0),
];

/// Busier months get heavier pickups: move-in (Sep) and spring clean-up (Apr).
fn seasonal_factor(month: u32) -> f64 {
    match month {
        9 => 1.5,
        4 => 1.3,
        6..=8 => 0.7,
        _ => 1.0,
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let first = NaiveDate::from_ymd_opt(2023, 1, 2).context("invalid start date")?;

    let mut rows = Vec::new();
    for week in 0..52 {
        let date = first + Duration::weeks(week);
        let season = seasonal_factor(date.month());
        for &(building, activity) in &BUILDINGS {
            for &(stream, mean, density) in &STREAMS {
                // Not every stream is collected every week.
                if rng.next_f64() < 0.35 {
                    continue;
                }
                let noise = 0.6 + 0.8 * rng.next_f64();
                let weight = (mean * activity * season * noise * 10.0).round() / 10.0;
                let volume = (weight / density * 100.0).round() / 100.0;
                rows.push(Row {
                    building,
                    stream,
                    date: date.format("%Y-%m-%d").to_string(),
                    weight,
                    volume,
                });
            }
        }
    }

    // CSV
    let csv_path = "sample_wastedata.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV file")?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    // Parquet
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("invalid epoch")?;
    let mut days = Vec::with_capacity(rows.len());
    for row in &rows {
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")?;
        days.push((date - epoch).num_days() as i32);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("Building", DataType::Utf8, false),
        Field::new("Stream", DataType::Utf8, false),
        Field::new("Date", DataType::Date32, false),
        Field::new("Weight", DataType::Float64, false),
        Field::new("Volume", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(rows.iter().map(|r| r.building).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.stream).collect::<Vec<_>>())),
            Arc::new(Date32Array::from(days)),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.weight).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(rows.iter().map(|r| r.volume).collect::<Vec<_>>())),
        ],
    )?;

    let parquet_path = "sample_wastedata.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote {} records to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
