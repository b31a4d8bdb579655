//! Marker, colour-scale and palette vocabulary
//!
//! Accepts the short matplotlib-style names people already type and maps
//! them onto the names plotly.js understands.

/// Colours handed out to dataset labels in first-seen order
pub const DATASET_PALETTE: [&str; 9] = [
    "crimson",
    "royalblue",
    "darkorange",
    "seagreen",
    "purple",
    "deeppink",
    "dodgerblue",
    "chocolate",
    "limegreen",
];

/// Colour used for unlabelled datasets without an override
pub const FALLBACK_COLOR: &str = "gray";

/// Size factor applied to cross-style markers in 3D scenes
pub const CROSS_MARKER_SCALE_3D: f64 = 0.3;

/// Map a marker name or matplotlib shorthand to a plotly symbol
///
/// Unknown names pass through unchanged so any plotly symbol can be used.
pub fn plotly_symbol(marker: &str) -> String {
    let symbol = match marker.trim() {
        "" | "o" | "." | "," => "circle",
        "x" => "x",
        "+" => "cross",
        "s" => "square",
        "D" | "d" => "diamond",
        "^" => "triangle-up",
        "v" => "triangle-down",
        "<" => "triangle-left",
        ">" => "triangle-right",
        "p" => "pentagon",
        "*" => "star",
        other => other,
    };
    symbol.to_string()
}

/// Whether a marker renders as a thin cross (drawn larger in 3D scenes)
pub fn is_cross_marker(marker: &str) -> bool {
    matches!(marker.trim(), "x" | "+" | "cross")
}

/// Map a colormap name to a plotly colour-scale name
///
/// Matching is case-insensitive; unknown names pass through.
pub fn plotly_colorscale(name: &str) -> String {
    let known = match name.trim().to_ascii_lowercase().as_str() {
        "" | "viridis" => "Viridis",
        "plasma" => "Plasma",
        "cividis" => "Cividis",
        "magma" => "Magma",
        "inferno" => "Inferno",
        "turbo" => "Turbo",
        "hot" => "Hot",
        "jet" => "Jet",
        _ => return name.to_string(),
    };
    known.to_string()
}

/// Palette colour for the n-th distinct label
pub fn palette_color(index: usize) -> &'static str {
    DATASET_PALETTE[index % DATASET_PALETTE.len()]
}

/// Parse a palette/CSS colour name into RGB for static previews
///
/// Only the palette names and a few basics are known; anything else is `None`.
pub fn named_rgb(name: &str) -> Option<(u8, u8, u8)> {
    let rgb = match name.trim().to_ascii_lowercase().as_str() {
        "crimson" => (220, 20, 60),
        "royalblue" => (65, 105, 225),
        "darkorange" => (255, 140, 0),
        "seagreen" => (46, 139, 87),
        "purple" => (128, 0, 128),
        "deeppink" => (255, 20, 147),
        "dodgerblue" => (30, 144, 255),
        "chocolate" => (210, 105, 30),
        "limegreen" => (50, 205, 50),
        "gray" | "grey" => (128, 128, 128),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let r = u8::from_str_radix(hex.get(1..3)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(3..5)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(5..7)?, 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matplotlib_markers() {
        assert_eq!(plotly_symbol("o"), "circle");
        assert_eq!(plotly_symbol("+"), "cross");
        assert_eq!(plotly_symbol("D"), "diamond");
        assert_eq!(plotly_symbol("^"), "triangle-up");
        assert_eq!(plotly_symbol("hexagram"), "hexagram");
    }

    #[test]
    fn test_cross_markers() {
        assert!(is_cross_marker("x"));
        assert!(is_cross_marker("cross"));
        assert!(!is_cross_marker("o"));
    }

    #[test]
    fn test_colorscale_mapping() {
        assert_eq!(plotly_colorscale("viridis"), "Viridis");
        assert_eq!(plotly_colorscale("MAGMA"), "Magma");
        assert_eq!(plotly_colorscale("RdBu"), "RdBu");
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(0), "crimson");
        assert_eq!(palette_color(DATASET_PALETTE.len()), "crimson");
    }

    #[test]
    fn test_named_rgb() {
        assert_eq!(named_rgb("royalblue"), Some((65, 105, 225)));
        assert_eq!(named_rgb("#ff8000"), Some((255, 128, 0)));
        assert_eq!(named_rgb("not-a-colour"), None);
        assert_eq!(named_rgb("#aéaé"), None);
        assert_eq!(named_rgb("#zz0000"), None);
    }
}
