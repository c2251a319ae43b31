use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::data::export::export_view;
use crate::state::AppState;

/// Dropdown entry that clears the constraint.
const ALL_LABEL: &str = "All";

// ---------------------------------------------------------------------------
// Left side panel – filter menu
// ---------------------------------------------------------------------------

/// Render the filter menu: colour and shape dropdowns plus the date range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, header: &str) {
    ui.heading(header);
    ui.separator();

    // Option lists live in the shared dataset; hold our own handle so the
    // state can be mutated while they are borrowed.
    let dataset = Arc::clone(&state.dataset);

    ui.strong("Colors Reported");
    if let Some(picked) = dropdown(
        ui,
        "colors-filter",
        state.selection.color_reported.as_deref(),
        dataset.colors(),
    ) {
        state.set_color(picked);
    }
    ui.add_space(8.0);

    ui.strong("Shape Reported");
    if let Some(picked) = dropdown(
        ui,
        "shape-filter",
        state.selection.shape_reported.as_deref(),
        dataset.shapes(),
    ) {
        state.set_shape(picked);
    }
    ui.add_space(8.0);

    ui.strong("Date Range");
    let mut start = state.selection.start_date;
    let mut end = state.selection.end_date;
    let mut changed = false;
    egui::Grid::new("date-range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("From");
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt("date-range-start"))
            .changed();
        ui.end_row();

        ui.label("To");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt("date-range-end"))
            .changed();
        ui.end_row();
    });
    ui.small(format!(
        "Allowed: {} – {}",
        dataset.min_date(),
        dataset.max_date()
    ));
    if changed {
        state.set_date_range(start, end);
    }

    ui.add_space(12.0);
    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }
}

/// Single-select, clearable dropdown. Returns `Some(choice)` when the user
/// picked an entry this frame, where `None` inside means "All".
fn dropdown(
    ui: &mut Ui,
    id: &str,
    current: Option<&str>,
    options: &[String],
) -> Option<Option<String>> {
    let current = current.filter(|c| !c.is_empty());
    let mut picked = None;

    egui::ComboBox::from_id_salt(id)
        .selected_text(current.unwrap_or(ALL_LABEL))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), ALL_LABEL).clicked() {
                picked = Some(None);
            }
            for opt in options {
                if ui
                    .selectable_label(current == Some(opt.as_str()), opt)
                    .clicked()
                {
                    picked = Some(Some(opt.clone()));
                }
            }
        });

    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} of {} sightings",
            state.view.len(),
            state.dataset.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Summary panel
// ---------------------------------------------------------------------------

pub fn summary_panel(ui: &mut Ui, state: &AppState, notes: &str) {
    ui.heading("Summary notes");

    let charts = &state.charts;
    let sel = &state.selection;
    if state.view.is_empty() {
        ui.label(format!(
            "No sightings between {} and {} for this selection.",
            sel.start_date, sel.end_date
        ));
    } else {
        ui.label(format!(
            "{} sightings between {} and {}.",
            charts.total, sel.start_date, sel.end_date
        ));
    }
    if let Some((state_name, count)) = charts.by_state.first() {
        ui.label(format!(
            "Most sightings: {state_name} ({count}) across {} states.",
            charts.by_state.len()
        ));
    }
    let stacked = &charts.color_shape;
    if let Some(i) = (0..stacked.categories.len()).max_by_key(|&i| stacked.category_total(i)) {
        ui.label(format!(
            "Most reported color: {} ({}).",
            stacked.categories[i],
            stacked.category_total(i)
        ));
    }
    if !notes.is_empty() {
        ui.label(notes);
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered sightings")
        .add_filter("CSV", &["csv"])
        .set_file_name("ufo_filtered.csv")
        .save_file();

    if let Some(path) = file {
        match export_view(&state.view, &path) {
            Ok(n) => {
                state.status_message = Some(format!("Exported {n} sightings"));
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
