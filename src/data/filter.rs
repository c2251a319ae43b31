use std::sync::Arc;

use chrono::NaiveDate;

use super::model::{Dataset, Sighting};
use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Filter selection: what the controls currently ask for
// ---------------------------------------------------------------------------

/// Colour / shape / date-range constraints.
///
/// `None` or an empty string for colour or shape means "no constraint".
/// Both dates are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub color_reported: Option<String>,
    pub shape_reported: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FilterSelection {
    /// No colour or shape constraint, covering the whole dataset.
    pub fn full_range(dataset: &Dataset) -> Self {
        FilterSelection {
            color_reported: None,
            shape_reported: None,
            start_date: dataset.min_date(),
            end_date: dataset.max_date(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_date > self.end_date {
            return Err(ValidationError::InvertedDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Whether a single sighting passes all constraints.
    pub fn matches(&self, sighting: &Sighting) -> bool {
        label_matches(self.color_reported.as_deref(), &sighting.color_reported)
            && label_matches(self.shape_reported.as_deref(), &sighting.shape_reported)
            && self.start_date <= sighting.date
            && sighting.date <= self.end_date
    }
}

fn label_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None | Some("") => true,
        Some(w) => w == actual,
    }
}

// ---------------------------------------------------------------------------
// FilteredView: the rows passing a selection, in dataset order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FilteredView {
    dataset: Arc<Dataset>,
    indices: Vec<usize>,
}

impl FilteredView {
    /// Row indices into the dataset, ascending.
    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Matching sightings in dataset (date) order.
    pub fn records(&self) -> impl Iterator<Item = &Sighting> + '_ {
        let all = self.dataset.sightings();
        self.indices.iter().map(move |&i| &all[i])
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Select every sighting matching `selection`.
///
/// Fails only when the date range is inverted. Dates are not clamped here,
/// so a range lying entirely outside the data gives an empty view.
pub fn apply_filters(
    dataset: &Arc<Dataset>,
    selection: &FilterSelection,
) -> Result<FilteredView, ValidationError> {
    selection.validate()?;

    let indices = dataset
        .sightings()
        .iter()
        .enumerate()
        .filter(|(_, s)| selection.matches(s))
        .map(|(i, _)| i)
        .collect();

    Ok(FilteredView {
        dataset: Arc::clone(dataset),
        indices,
    })
}
