use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::curves::Curve;

/// Vertical marker at the FSC=0.143 crossing.
pub const GOLD_STANDARD_MARKER: Color32 = Color32::RED;

/// Vertical marker at the FSC=0.5 crossing.
pub const FSC_HALF_MARKER: Color32 = Color32::BLUE;

/// Horizontal threshold reference lines.
pub const THRESHOLD_LINE: Color32 = Color32::GRAY;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (210.0 + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.70, 0.50);
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
// Color mapping: curve column → Color32
// ---------------------------------------------------------------------------

/// Stable colour per curve column, so a curve keeps its colour across panels.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign colours in the given curve order.
    pub fn new(curves: &[Curve]) -> Self {
        let palette = generate_palette(curves.len());
        let mapping = curves
            .iter()
            .zip(palette)
            .map(|(c, color)| (c.column.clone(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }

    /// Look up the colour for a curve column.
    pub fn color_for(&self, column: &str) -> Color32 {
        self.mapping
            .get(column)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(name: &str) -> Curve {
        Curve {
            column: name.to_string(),
            label: name.to_string(),
        }
    }

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in i + 1..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_column_gets_default() {
        let map = ColorMap::new(&[curve("A"), curve("B")]);
        assert_ne!(map.color_for("A"), map.color_for("B"));
        assert_eq!(map.color_for("C"), Color32::LIGHT_BLUE);
    }
}
