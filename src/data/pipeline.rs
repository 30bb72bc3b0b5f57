use super::filter::{filter, FilterCriteria, FilteredView};
use super::model::{Record, WasteDataset};
use super::stats::{stream_counts, weight_over_time, DailyWeight, StreamCount, Summary};

// ---------------------------------------------------------------------------
// Filter → aggregate, recomputed on every criteria change
// ---------------------------------------------------------------------------

/// Everything the dashboard shows for one set of criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub view: FilteredView,
    pub stream_counts: Vec<StreamCount>,
    pub weight_over_time: Vec<DailyWeight>,
    /// `None` exactly when the view is empty.
    pub summary: Option<Summary>,
}

impl PipelineOutput {
    /// Whether the views must show their "no data" placeholder.
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }
}

/// Run the pipeline over the dataset. Never mutates `dataset`.
pub fn run(dataset: &WasteDataset, criteria: &FilterCriteria) -> PipelineOutput {
    let view = filter(dataset, criteria);
    if view.is_empty() {
        return PipelineOutput {
            view,
            ..PipelineOutput::default()
        };
    }

    let records: Vec<&Record> = view.indices.iter().map(|&i| &dataset.records[i]).collect();
    PipelineOutput {
        stream_counts: stream_counts(records.iter().copied()),
        weight_over_time: weight_over_time(records.iter().copied()),
        summary: Some(Summary::of(records.iter().copied())),
        view,
    }
}
