use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{FromColor, Hsv, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Hue step between consecutive series, in degrees.
const GOLDEN_ANGLE: f32 = 137.507_77;

/// Generates `n` visually distinct colours.
///
/// Hues advance by the golden angle so neighbouring series never sit next to
/// each other on the wheel; brightness alternates between two levels.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 * GOLDEN_ANGLE) % 360.0;
            let value = if i % 2 == 0 { 0.85 } else { 0.7 };
            let rgb = Srgb::from_color(Hsv::new(hue, 0.6, value)).into_format::<u8>();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: stack label → Color32
// ---------------------------------------------------------------------------

/// Stable colour per series label, so a shape keeps its colour while the
/// filters change which shapes are visible.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over the full set of labels.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let mapping = labels
            .iter()
            .zip(generate_palette(labels.len()))
            .map(|(l, c)| (l.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label; unknown labels get the default grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(6);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn neighbouring_series_differ_in_hue() {
        let colours = generate_palette(3);
        // Hue 0 is red-dominant, the next step (~137°) green-dominant.
        assert!(colours[0].r() > colours[0].g());
        assert!(colours[1].g() > colours[1].r());
        assert_ne!(colours[1], colours[2]);
    }

    #[test]
    fn unknown_label_falls_back_to_grey() {
        let cm = ColorMap::new(["DISK", "OVAL"]);
        assert_ne!(cm.color_for("DISK"), cm.color_for("OVAL"));
        assert_eq!(cm.color_for("TRIANGLE"), Color32::GRAY);
    }
}
