use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::data::aggregate::{ChartSet, UNSPECIFIED};
use crate::data::filter::{apply_filters, FilterSelection, FilteredView};
use crate::data::model::Dataset;
use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, never mutated.
    pub dataset: Arc<Dataset>,

    /// What the controls currently ask for.
    pub selection: FilterSelection,

    /// Rows passing `selection` (cached until the next change).
    pub view: FilteredView,

    /// Aggregates over `view`.
    pub charts: ChartSet,

    /// One colour per shape, shared by the stacked chart legend.
    pub shape_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start with the full-range selection already applied.
    pub fn new(dataset: Arc<Dataset>) -> Result<Self, ValidationError> {
        let selection = FilterSelection::full_range(&dataset);
        let view = apply_filters(&dataset, &selection)?;
        let charts = ChartSet::from_view(&view);
        let shape_colors = ColorMap::new(
            dataset
                .shapes()
                .iter()
                .map(String::as_str)
                .chain([UNSPECIFIED]),
        );

        Ok(Self {
            dataset,
            selection,
            view,
            charts,
            shape_colors,
            status_message: None,
        })
    }

    /// Set or clear the colour constraint.
    pub fn set_color(&mut self, color: Option<String>) {
        let mut next = self.selection.clone();
        next.color_reported = color;
        self.update_selection(next);
    }

    /// Set or clear the shape constraint.
    pub fn set_shape(&mut self, shape: Option<String>) {
        let mut next = self.selection.clone();
        next.shape_reported = shape;
        self.update_selection(next);
    }

    /// Reject an inverted range as entered, then clamp both dates into the
    /// dataset bounds and apply. On rejection the previous selection stays.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let mut next = self.selection.clone();
        next.start_date = start;
        next.end_date = end;
        if let Err(e) = next.validate() {
            self.reject(e);
            return;
        }
        next.start_date = self.dataset.clamp_date(start);
        next.end_date = self.dataset.clamp_date(end);
        self.update_selection(next);
    }

    /// Back to no colour/shape constraint over the full date range.
    pub fn reset_filters(&mut self) {
        self.update_selection(FilterSelection::full_range(&self.dataset));
    }

    /// One recomputation cycle: filter → aggregate. On a validation error
    /// nothing changes except the status line.
    pub fn update_selection(&mut self, next: FilterSelection) {
        match self.recompute(&next) {
            Ok(()) => {
                self.selection = next;
                self.status_message = None;
            }
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, e: ValidationError) {
        log::warn!("Rejected filter change: {e}");
        self.status_message = Some(format!("Invalid filter: {e}"));
    }

    fn recompute(&mut self, selection: &FilterSelection) -> Result<(), ValidationError> {
        let view = apply_filters(&self.dataset, selection)?;
        self.charts = ChartSet::from_view(&view);
        self.view = view;
        log::debug!(
            "Filter {:?} → {} of {} sightings",
            selection,
            self.view.len(),
            self.dataset.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Sighting, COLOR_COLUMN, DATE_COLUMN, SHAPE_COLUMN};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> AppState {
        let rows = vec![
            Sighting::new(date(2020, 1, 1), "Red", "Circle"),
            Sighting::new(date(2020, 6, 1), "Blue", "Oval"),
            Sighting::new(date(2020, 9, 1), "Red", "Oval"),
        ];
        let columns = vec![
            DATE_COLUMN.to_string(),
            COLOR_COLUMN.to_string(),
            SHAPE_COLUMN.to_string(),
        ];
        AppState::new(Arc::new(Dataset::from_sightings(rows, columns).unwrap())).unwrap()
    }

    #[test]
    fn starts_with_everything_visible() {
        let st = state();
        assert_eq!(st.view.len(), 3);
        assert_eq!(st.charts.total, 3);
        assert_eq!(st.selection.start_date, date(2020, 1, 1));
        assert_eq!(st.selection.end_date, date(2020, 9, 1));
        assert!(st.status_message.is_none());
    }

    #[test]
    fn dropdown_changes_recompute_charts() {
        let mut st = state();
        st.set_color(Some("Red".into()));
        assert_eq!(st.charts.total, 2);

        st.set_shape(Some("Oval".into()));
        assert_eq!(st.view.indices(), [2]);

        st.set_color(None);
        assert_eq!(st.charts.total, 2);
    }

    #[test]
    fn dates_are_clamped_to_dataset_bounds() {
        let mut st = state();
        st.set_date_range(date(1990, 1, 1), date(2099, 1, 1));

        assert_eq!(st.selection.start_date, date(2020, 1, 1));
        assert_eq!(st.selection.end_date, date(2020, 9, 1));
        assert_eq!(st.view.len(), 3);
    }

    #[test]
    fn inverted_range_keeps_previous_state() {
        let mut st = state();
        st.set_color(Some("Red".into()));
        let before = st.selection.clone();
        let charts_before = st.charts.clone();

        st.set_date_range(date(2020, 8, 1), date(2020, 2, 1));

        assert_eq!(st.selection, before);
        assert_eq!(st.charts, charts_before);
        let msg = st.status_message.as_deref().unwrap();
        assert!(msg.contains("after end date"));

        // A valid change clears the message.
        st.set_date_range(date(2020, 1, 1), date(2020, 6, 30));
        assert!(st.status_message.is_none());
        assert_eq!(st.view.len(), 1);
    }

    #[test]
    fn inverted_range_past_the_data_is_rejected_before_clamping() {
        let mut st = state();
        let before = st.selection.clone();

        // Both dates clamp to 2020-09-01; the entered range is still inverted.
        st.set_date_range(date(2031, 1, 1), date(2030, 1, 1));

        assert_eq!(st.selection, before);
        assert_eq!(st.view.len(), 3);
        let msg = st.status_message.as_deref().unwrap();
        assert!(msg.contains("2031-01-01"));
    }

    #[test]
    fn range_past_the_data_clamps_to_last_day() {
        let mut st = state();
        st.set_date_range(date(2030, 1, 1), date(2031, 1, 1));

        assert!(st.status_message.is_none());
        assert_eq!(st.selection.start_date, date(2020, 9, 1));
        assert_eq!(st.selection.end_date, date(2020, 9, 1));
        assert_eq!(st.view.len(), 1);
    }

    #[test]
    fn reset_restores_full_range() {
        let mut st = state();
        st.set_shape(Some("Circle".into()));
        st.set_date_range(date(2020, 1, 1), date(2020, 1, 1));
        st.reset_filters();

        assert_eq!(st.selection, FilterSelection::full_range(&st.dataset));
        assert_eq!(st.view.len(), 3);
    }
}
