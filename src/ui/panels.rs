use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::filter::FilterColumn;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            multi_select(ui, state, FilterColumn::Building);
            multi_select(ui, state, FilterColumn::Stream);
            ui.separator();
            date_range(ui, state);
            ui.separator();
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

/// Collapsible checkbox list for one categorical column.
fn multi_select(ui: &mut Ui, state: &mut AppState, column: FilterColumn) {
    let (Some(ds), Some(criteria)) = (&state.dataset, &state.criteria) else {
        return;
    };
    let all_values = match column {
        FilterColumn::Building => ds.buildings.clone(),
        FilterColumn::Stream => ds.streams.clone(),
    };
    let selected = criteria.selection(column).clone();

    let header_text = format!(
        "Select {}s  ({}/{})",
        column.label(),
        selected.len(),
        all_values.len()
    );

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(column.label())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(column);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(column);
                }
            });

            for value in &all_values {
                let mut text = RichText::new(value);
                if column == FilterColumn::Stream {
                    text = text.color(state.color_map.color_for(value));
                }
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle(column, value);
                }
            }
        });
}

/// Start / end date pickers.
fn date_range(ui: &mut Ui, state: &mut AppState) {
    let (Some(ds), Some(criteria)) = (&state.dataset, &state.criteria) else {
        return;
    };
    if ds.date_span().is_none() {
        ui.label("No dates in this dataset.");
        return;
    }
    let (mut start, mut end) = (criteria.start, criteria.end);

    let mut changed = false;
    egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Start Date");
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt("start_date"))
            .changed();
        ui.end_row();

        ui.label("End Date");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt("end_date"))
            .changed();
        ui.end_row();
    });

    if start > end {
        ui.label(RichText::new("Start date is after end date").color(Color32::DARK_RED));
    }
    if changed {
        state.set_date_range(start, end);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} shown",
                ds.len(),
                state.output.view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open waste data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records: {} buildings, {} streams",
                    dataset.len(),
                    dataset.buildings.len(),
                    dataset.streams.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                // The previous dataset stays on screen.
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
