use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Weekday};

use super::filter::FilteredView;
use super::model::{Sighting, STATE_COLUMN};

/// Bucket label for sightings with no state recorded.
pub const UNKNOWN_STATE: &str = "Unknown";
/// Bucket label for an empty colour or shape.
pub const UNSPECIFIED: &str = "Unspecified";

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ---------------------------------------------------------------------------
// Stacked counts: categories on x, one series per stack layer
// ---------------------------------------------------------------------------

/// Counts for a stacked bar chart.
///
/// `series[k].1[i]` is the count of stack `series[k].0` in `categories[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackedCounts {
    pub categories: Vec<String>,
    pub series: Vec<(String, Vec<usize>)>,
}

impl StackedCounts {
    /// Total across all stacks for category `i`.
    pub fn category_total(&self, i: usize) -> usize {
        self.series.iter().map(|(_, counts)| counts[i]).sum()
    }
}

// ---------------------------------------------------------------------------
// ChartSet: everything the three charts and summary need
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSet {
    pub total: usize,
    /// Geographic count, largest first, ties by name.
    pub by_state: Vec<(String, usize)>,
    /// Colour on x, stacked by shape.
    pub color_shape: StackedCounts,
    /// Monday through Sunday.
    pub by_weekday: [usize; 7],
}

impl ChartSet {
    pub fn from_view(view: &FilteredView) -> Self {
        Self::from_records(view.records())
    }

    pub fn from_records<'a>(records: impl Iterator<Item = &'a Sighting>) -> Self {
        let mut total = 0;
        let mut states: BTreeMap<&str, usize> = BTreeMap::new();
        let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        let mut by_weekday = [0usize; 7];

        for s in records {
            total += 1;

            let state = s
                .field(STATE_COLUMN)
                .filter(|v| !v.is_empty())
                .unwrap_or(UNKNOWN_STATE);
            *states.entry(state).or_default() += 1;

            let color = label_or_unspecified(&s.color_reported);
            let shape = label_or_unspecified(&s.shape_reported);
            *pairs.entry((color, shape)).or_default() += 1;

            by_weekday[s.date.weekday().num_days_from_monday() as usize] += 1;
        }

        let mut by_state: Vec<(String, usize)> = states
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        // BTreeMap order gives name ascending; stable sort keeps it for ties.
        by_state.sort_by(|a, b| b.1.cmp(&a.1));

        ChartSet {
            total,
            by_state,
            color_shape: stack(&pairs),
            by_weekday,
        }
    }

    /// Whether the underlying view had no rows.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

fn label_or_unspecified(label: &str) -> &str {
    if label.is_empty() {
        UNSPECIFIED
    } else {
        label
    }
}

fn stack(pairs: &BTreeMap<(&str, &str), usize>) -> StackedCounts {
    let categories: Vec<&str> = pairs
        .keys()
        .map(|(c, _)| *c)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let layers: BTreeSet<&str> = pairs.keys().map(|(_, s)| *s).collect();

    let series = layers
        .into_iter()
        .map(|layer| {
            let counts = categories
                .iter()
                .map(|cat| pairs.get(&(*cat, layer)).copied().unwrap_or(0))
                .collect();
            (layer.to_string(), counts)
        })
        .collect();

    StackedCounts {
        categories: categories.into_iter().map(str::to_string).collect(),
        series,
    }
}
