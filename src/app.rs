use eframe::egui::{self, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct UfoDashboardApp {
    pub state: AppState,
    header: String,
    summary_notes: String,
}

impl UfoDashboardApp {
    pub fn new(state: AppState, config: &DashboardConfig) -> Self {
        Self {
            state,
            header: config.header.clone(),
            summary_notes: config.summary_notes.clone(),
        }
    }
}

impl eframe::App for UfoDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filter menu ----
        egui::SidePanel::left("menu-id")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.header);
            });

        // ---- Bottom panel: summary ----
        egui::TopBottomPanel::bottom("summary")
            .resizable(false)
            .show(ctx, |ui| {
                panels::summary_panel(ui, &self.state, &self.summary_notes);
            });

        // ---- Central panel: the three charts side by side ----
        let state = &self.state;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(3, |cols: &mut [Ui]| {
                charts::state_chart(&mut cols[0], &state.charts);
                charts::color_shape_chart(&mut cols[1], &state.charts, &state.shape_colors);
                charts::weekday_chart(&mut cols[2], &state.charts);
            });
        });
    }
}
