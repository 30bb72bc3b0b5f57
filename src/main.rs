mod app;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::WasteDashboardApp;
use clap::Parser;
use config::Args;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut state = AppState::default();
    if let Some(path) = &args.data {
        // A configured dataset that cannot be loaded is fatal.
        let dataset = data::loader::load_file(path)?;
        log::info!(
            "Loaded {} records from {}: {} buildings, {} streams",
            dataset.len(),
            path.display(),
            dataset.buildings.len(),
            dataset.streams.len()
        );
        let criteria = args
            .initial_criteria(&dataset)
            .context("invalid filter arguments")?;

        if args.headless {
            let output = data::pipeline::run(&dataset, &criteria);
            print!("{}", report::render(&dataset, &criteria, &output)?);
            return Ok(());
        }
        state.set_dataset_with(Arc::new(dataset), criteria);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Waste Data Visualization Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(WasteDashboardApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
