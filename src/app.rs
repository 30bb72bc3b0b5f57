use eframe::egui::{self, Color32, ScrollArea, Ui};

use crate::report::NO_DATA;
use crate::state::AppState;
use crate::ui::{panels, plot, story, table};

/// Pale green page background.
const BACKGROUND: Color32 = Color32::from_rgb(0xE6, 0xFF, 0xE6);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WasteDashboardApp {
    pub state: AppState,
}

impl WasteDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = BACKGROUND;
        cc.egui_ctx.set_visuals(visuals);
        Self { state }
    }
}

impl eframe::App for WasteDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: story, table, charts, statistics ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading("Waste Data Visualization Dashboard");
    story::story(ui);
    ui.separator();

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view waste data  (File → Open…)");
        });
        return;
    }

    ui.strong("Filtered Data");
    table::data_table(ui, state);
    ui.separator();

    ui.strong("Waste Weight by Date");
    let Some(summary) = &state.output.summary else {
        ui.label(NO_DATA);
        ui.separator();
        ui.strong("Summary Statistics");
        ui.label(NO_DATA);
        return;
    };
    plot::weight_chart(ui, state);
    ui.separator();

    ui.strong("Distribution of Waste Streams");
    plot::stream_pie(ui, state);
    ui.separator();

    ui.strong("Summary Statistics");
    table::summary_table(ui, summary);
}
