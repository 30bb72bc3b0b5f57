use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::data::filter::{FilterColumn, FilterCriteria};
use crate::data::model::WasteDataset;
use crate::data::pipeline::{self, PipelineOutput};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset, shared read-only (None until a file is loaded).
    pub dataset: Option<Arc<WasteDataset>>,

    /// Current filter selections.
    pub criteria: Option<FilterCriteria>,

    /// Pipeline output for the current criteria (cached).
    pub output: PipelineOutput,

    /// Stream colours shared by both charts.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset with every filter wide open.
    pub fn set_dataset(&mut self, dataset: WasteDataset) {
        let criteria = FilterCriteria::full_domain(&dataset);
        self.set_dataset_with(Arc::new(dataset), criteria);
    }

    /// Ingest a dataset with explicit starting criteria.
    pub fn set_dataset_with(&mut self, dataset: Arc<WasteDataset>, criteria: FilterCriteria) {
        self.color_map = ColorMap::new(&dataset.streams);
        self.dataset = Some(dataset);
        self.criteria = Some(criteria);
        self.status_message = None;
        self.recompute();
    }

    /// Re-run the pipeline after a criteria change.
    pub fn recompute(&mut self) {
        if let (Some(ds), Some(criteria)) = (&self.dataset, &self.criteria) {
            self.output = pipeline::run(ds, criteria);
            log::debug!("{} of {} records match", self.output.view.len(), ds.len());
        }
    }

    /// Toggle a single value in a column's selection.
    pub fn toggle(&mut self, column: FilterColumn, value: &str) {
        let Some(criteria) = &mut self.criteria else {
            return;
        };
        let selected = criteria.selection_mut(column);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.recompute();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        if let (Some(ds), Some(criteria)) = (&self.dataset, &mut self.criteria) {
            let all = match column {
                FilterColumn::Building => &ds.buildings,
                FilterColumn::Stream => &ds.streams,
            };
            *criteria.selection_mut(column) = all.iter().cloned().collect();
            self.recompute();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        if let Some(criteria) = &mut self.criteria {
            criteria.selection_mut(column).clear();
            self.recompute();
        }
    }

    /// Set the inclusive date range. `start > end` yields an empty view.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        if let Some(criteria) = &mut self.criteria {
            criteria.start = start;
            criteria.end = end;
            self.recompute();
        }
    }

    /// Restore the full-domain criteria.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = Some(FilterCriteria::full_domain(ds));
            self.recompute();
        }
    }
}
