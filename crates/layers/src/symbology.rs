/// Fill used for non-positive (and non-numeric) density levels.
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

/// Heat-scale break table, highest threshold first.
///
/// A level maps to the color of the first row whose threshold it reaches;
/// any positive level below every row maps to `DENSITY_FLOOR_COLOR`. The
/// table is the published legend and must not be interpolated.
pub const DENSITY_BREAKS: [(f64, &str); 7] = [
    (10_000.0, "#800026"),
    (1_000.0, "#BD0026"),
    (100.0, "#E31A1C"),
    (10.0, "#FC4E2A"),
    (1.0, "#FD8D3C"),
    (0.1, "#FEB24C"),
    (1e8, "#FED976"),
];

pub const DENSITY_FLOOR_COLOR: &str = "#fff7d4";

pub fn density_color(level: f64) -> &'static str {
    for (threshold, color) in DENSITY_BREAKS {
        if level >= threshold {
            return color;
        }
    }
    if level > 0.0 {
        DENSITY_FLOOR_COLOR
    } else {
        TRANSPARENT
    }
}

/// Path styling for a filled density region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStyle {
    pub fill: bool,
    pub fill_color: &'static str,
    pub fill_opacity: f32,
    pub fill_rule: &'static str,
    /// Outline.
    pub color: &'static str,
    pub weight: f32,
    pub opacity: f32,
    pub dash_array: &'static str,
}

impl RegionStyle {
    pub fn density(level: f64) -> Self {
        Self {
            fill_color: density_color(level),
            ..Self::default()
        }
    }
}

impl Default for RegionStyle {
    fn default() -> Self {
        Self {
            fill: true,
            fill_color: TRANSPARENT,
            fill_opacity: 0.5,
            fill_rule: "nonzero",
            color: "red",
            weight: 2.0,
            opacity: 1.0,
            dash_array: "3",
        }
    }
}
