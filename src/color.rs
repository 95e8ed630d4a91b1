use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues, as CSS
/// hex strings (`#rrggbb`).
pub fn generate_palette(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            format!(
                "#{:02x}{:02x}{:02x}",
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category value → colour
// ---------------------------------------------------------------------------

/// Maps the categories of one column to distinct colours.
///
/// Built once from the whole table so a category keeps its colour no matter
/// which subset a chart shows.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: String,
    /// Categories in the order they were given.
    order: Vec<String>,
    mapping: BTreeMap<String, String>,
    default_color: String,
}

impl ColorMap {
    /// Build a colour map for the given column from its distinct values.
    pub fn new<'a>(column: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        let order: Vec<String> = values.into_iter().map(str::to_string).collect();
        let palette = generate_palette(order.len());
        let mapping = order.iter().cloned().zip(palette).collect();

        ColorMap {
            column: column.to_string(),
            order,
            mapping,
            default_color: "#888888".to_string(),
        }
    }

    /// Look up the colour for a given category.
    pub fn color_for(&self, value: &str) -> &str {
        self.mapping
            .get(value)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[String] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_hex_colours() {
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        for c in &palette {
            assert_eq!(c.len(), 7);
            assert!(c.starts_with('#'));
        }
        let unique: std::collections::BTreeSet<_> = palette.iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn first_hue_is_red() {
        // hue 0, s 0.75, l 0.55 → (226, 54, 54)
        assert_eq!(generate_palette(1), vec!["#e23636".to_string()]);
    }

    #[test]
    fn unknown_category_gets_default_colour() {
        let map = ColorMap::new("Booster Version Category", ["v1.0", "FT"]);
        assert_ne!(map.color_for("v1.0"), map.color_for("FT"));
        assert_eq!(map.color_for("B5"), "#888888");
        assert_eq!(map.categories(), ["v1.0".to_string(), "FT".to_string()]);
        assert_eq!(map.column, "Booster Version Category");
    }
}
