/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WasteDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ WasteDataset  │  Vec<Record>, building/stream domains
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → FilteredView (indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  stream counts, weight over time, describe
///   └──────────┘
/// ```
/// `pipeline::run` chains the last two steps.

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod stats;
