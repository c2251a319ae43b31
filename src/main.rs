mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use eframe::egui;

use app::UfoDashboardApp;
use config::DashboardConfig;
use state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load()?;

    // The dashboard never starts on a partial dataset.
    let dataset = data::loader::load_dataset(&config.data_file)
        .with_context(|| format!("loading {}", config.data_file.display()))
        .inspect_err(|e| log::error!("{e:#}"))?;
    let state = AppState::new(Arc::new(dataset))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.app_title.clone())
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let title = config.app_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(UfoDashboardApp::new(state, &config)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
