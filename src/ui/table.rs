use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::stats::{stat_values, Summary, STAT_LABELS};
use crate::report::format_stat;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const TABLE_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Filtered data table
// ---------------------------------------------------------------------------

/// Render the filtered records; the first column is the source row index.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let view = &state.output.view;

    ui.push_id("filtered_data", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(TABLE_HEIGHT)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::auto().at_least(48.0))
            .columns(Column::auto().at_least(110.0), 3)
            .column(Column::auto().at_least(80.0))
            .column(Column::remainder().at_least(80.0))
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for title in ["", "Building", "Stream", "Date", "Weight", "Volume"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.len(), |mut row| {
                    let idx = view.indices[row.index()];
                    let r = &ds.records[idx];
                    row.col(|ui: &mut Ui| {
                        ui.weak(idx.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&r.building);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&r.stream);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.date.format("%Y-%m-%d").to_string());
                    });
                    for value in [r.weight, r.volume] {
                        row.col(|ui: &mut Ui| {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                                ui.label(format!("{value:.2}"));
                            });
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Summary statistics table
// ---------------------------------------------------------------------------

/// Render `describe()`-style statistics for Weight and Volume.
pub fn summary_table(ui: &mut Ui, summary: &Summary) {
    let columns = summary.columns();
    egui::Grid::new("summary_statistics")
        .striped(true)
        .min_col_width(80.0)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for (name, _) in &columns {
                ui.strong(*name);
            }
            ui.end_row();

            for (row, label) in STAT_LABELS.iter().enumerate() {
                ui.strong(*label);
                for (_, stats) in &columns {
                    let value = stat_values(*stats)[row];
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                        ui.monospace(format_stat(value));
                    });
                }
                ui.end_row();
            }
        });
}
