use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const INDEX_COLUMN: &str = "Index";
pub const DATE_COLUMN: &str = "Date";
pub const COLOR_COLUMN: &str = "Colors Reported";
pub const SHAPE_COLUMN: &str = "Shape Reported";
/// Pass-through column used for the geographic chart, when present.
pub const STATE_COLUMN: &str = "State";

// ---------------------------------------------------------------------------
// Sighting – one row of the CSV
// ---------------------------------------------------------------------------

/// A single sighting record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sighting {
    pub date: NaiveDate,
    /// Empty when nothing was reported.
    pub color_reported: String,
    /// Empty when nothing was reported.
    pub shape_reported: String,
    /// Every other column (except `Index`): column_name → raw cell text.
    pub extra: BTreeMap<String, String>,
}

impl Sighting {
    pub fn new(date: NaiveDate, color: &str, shape: &str) -> Self {
        Sighting {
            date,
            color_reported: color.to_string(),
            shape_reported: shape.to_string(),
            extra: BTreeMap::new(),
        }
    }

    /// Builder-style helper for attaching a pass-through column.
    pub fn with_extra(mut self, column: &str, value: &str) -> Self {
        self.extra.insert(column.to_string(), value.to_string());
        self
    }

    /// Look up any loaded column by its header name.
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            COLOR_COLUMN => Some(&self.color_reported),
            SHAPE_COLUMN => Some(&self.shape_reported),
            _ => self.extra.get(column).map(String::as_str),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded, date-sorted table
// ---------------------------------------------------------------------------

/// The full dataset, sorted ascending by date, with pre-computed filter
/// options and date bounds. Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    sightings: Vec<Sighting>,
    /// Loaded column names in file order (`Index` excluded).
    column_names: Vec<String>,
    colors: Vec<String>,
    shapes: Vec<String>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl Dataset {
    /// Sort the sightings (stable) and build the option lists and bounds.
    pub fn from_sightings(
        mut sightings: Vec<Sighting>,
        column_names: Vec<String>,
    ) -> Result<Self, DataLoadError> {
        sightings.sort_by_key(|s| s.date);

        let (min_date, max_date) = match (sightings.first(), sightings.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => return Err(DataLoadError::Empty),
        };

        let colors = distinct_non_empty(sightings.iter().map(|s| s.color_reported.as_str()));
        let shapes = distinct_non_empty(sightings.iter().map(|s| s.shape_reported.as_str()));

        Ok(Dataset {
            sightings,
            column_names,
            colors,
            shapes,
            min_date,
            max_date,
        })
    }

    pub fn sightings(&self) -> &[Sighting] {
        &self.sightings
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Distinct non-empty colours, ascending.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Distinct non-empty shapes, ascending.
    pub fn shapes(&self) -> &[String] {
        &self.shapes
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// Clamp `date` into `[min_date, max_date]`.
    pub fn clamp_date(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min_date, self.max_date)
    }

    /// Number of sightings (never zero).
    pub fn len(&self) -> usize {
        self.sightings.len()
    }
}

fn distinct_non_empty<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
