use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Season;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `start_hue` degrees.
pub fn generate_palette(n: usize, start_hue: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (start_hue + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: chart line label → Color32
// ---------------------------------------------------------------------------

/// Colours for the chart lines, keyed by series label.
///
/// Seasons always get the same colour (winter starts in the blue range) so
/// switching filters does not repaint the legend.
#[derive(Debug, Clone)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        let palette = generate_palette(Season::ALL.len(), 210.0);
        let mapping = Season::ALL
            .iter()
            .zip(palette)
            .map(|(s, c)| (s.name().to_string(), c))
            .collect();
        SeriesColors {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }
}

impl SeriesColors {
    /// Look up the colour for a series label.
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
    fn palette_has_distinct_colours() {
        let colors = generate_palette(4, 0.0);
        assert_eq!(colors.len(), 4);
        for i in 0..colors.len() {
            for j in i + 1..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
        assert!(generate_palette(0, 0.0).is_empty());
    }

    #[test]
    fn seasons_have_their_own_colour() {
        let colors = SeriesColors::default();
        assert_ne!(colors.color_for("winter"), colors.color_for("summer"));
        assert_eq!(colors.color_for("value"), Color32::LIGHT_BLUE);
    }
}
