use std::ops::RangeInclusive;

use chrono::Weekday;
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::color::ColorMap;
use crate::data::aggregate::{ChartSet, StackedCounts, WEEKDAYS};

const BAR_WIDTH: f64 = 0.7;
const BAR_COLOR: Color32 = Color32::from_rgb(23, 184, 151);

// ---------------------------------------------------------------------------
// chart1-id: sightings by state
// ---------------------------------------------------------------------------

pub fn state_chart(ui: &mut Ui, charts: &ChartSet) {
    ui.heading("Sightings by state");
    empty_hint(ui, charts);

    let labels: Vec<String> = charts.by_state.iter().map(|(s, _)| s.clone()).collect();
    let bars = charts
        .by_state
        .iter()
        .enumerate()
        .map(|(i, (name, count))| Bar::new(i as f64, *count as f64).name(name))
        .collect();
    let chart = BarChart::new(bars)
        .name("Sightings")
        .color(BAR_COLOR)
        .width(BAR_WIDTH);

    Plot::new("chart1-id")
        .x_axis_formatter(category_labels(labels))
        .y_axis_label("Sightings")
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// chart2-id: colour on x, stacked by shape
// ---------------------------------------------------------------------------

pub fn color_shape_chart(ui: &mut Ui, charts: &ChartSet, shape_colors: &ColorMap) {
    ui.heading("Sightings by color and shape");
    empty_hint(ui, charts);

    let stacked = stacked_bars(&charts.color_shape, shape_colors);

    Plot::new("chart2-id")
        .legend(Legend::default())
        .x_axis_formatter(category_labels(charts.color_shape.categories.clone()))
        .y_axis_label("Sightings")
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for chart in stacked {
                plot_ui.bar_chart(chart);
            }
        });
}

/// One `BarChart` per shape, each stacked on the ones before it.
fn stacked_bars(counts: &StackedCounts, shape_colors: &ColorMap) -> Vec<BarChart> {
    let mut drawn: Vec<BarChart> = Vec::with_capacity(counts.series.len());
    for (shape, values) in &counts.series {
        let bars = values
            .iter()
            .enumerate()
            .map(|(i, v)| Bar::new(i as f64, *v as f64).name(&counts.categories[i]))
            .collect();
        let below: Vec<&BarChart> = drawn.iter().collect();
        let chart = BarChart::new(bars)
            .name(shape)
            .color(shape_colors.color_for(shape))
            .width(BAR_WIDTH)
            .stack_on(&below);
        drawn.push(chart);
    }
    drawn
}

// ---------------------------------------------------------------------------
// chart3-id: sightings by day of week
// ---------------------------------------------------------------------------

pub fn weekday_chart(ui: &mut Ui, charts: &ChartSet) {
    ui.heading("Sightings by day of week");
    empty_hint(ui, charts);

    let labels: Vec<String> = WEEKDAYS.iter().map(|d| weekday_label(*d).to_string()).collect();
    let bars = charts
        .by_weekday
        .iter()
        .zip(WEEKDAYS)
        .enumerate()
        .map(|(i, (count, day))| Bar::new(i as f64, *count as f64).name(weekday_label(day)))
        .collect();
    let chart = BarChart::new(bars)
        .name("Sightings")
        .color(BAR_COLOR)
        .width(BAR_WIDTH);

    Plot::new("chart3-id")
        .x_axis_formatter(category_labels(labels))
        .y_axis_label("Sightings")
        .include_y(0.0)
        .include_x(-0.5)
        .include_x(6.5)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn empty_hint(ui: &mut Ui, charts: &ChartSet) {
    if charts.is_empty() {
        ui.weak("No sightings match the current filters.");
    }
}

/// X-axis formatter naming integer positions after `labels`.
fn category_labels(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| category_label(&labels, mark.value).unwrap_or_default()
}

fn category_label(labels: &[String], x: f64) -> Option<String> {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return None;
    }
    labels.get(i as usize).cloned()
}
