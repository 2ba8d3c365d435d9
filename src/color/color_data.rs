//! Color data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in color_operations.rs

/// Canonical color value produced by the color parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Fully transparent, rendered as ARGB 0
    Transparent,
    /// Opaque color from `#RRGGBB`, `rgb(r,g,b)` or a named color
    Rgb { r: u8, g: u8, b: u8 },
    /// Color with explicit alpha from `#AARRGGBB`
    Argb { a: u8, r: u8, g: u8, b: u8 },
}

/// Named colors accepted by the parser, with their `#RRGGBB` value
pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#FFFFFF"),
    ("red", "#FF0000"),
    ("green", "#008000"),
    ("blue", "#0000FF"),
    ("yellow", "#FFFF00"),
    ("orange", "#FFA500"),
    ("purple", "#800080"),
    ("pink", "#FFC0CB"),
    ("cyan", "#00FFFF"),
    ("magenta", "#FF00FF"),
    ("lime", "#00FF00"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("brown", "#A52A2A"),
    ("dark_red", "#8B0000"),
    ("dark_green", "#006400"),
    ("dark_blue", "#00008B"),
    ("dark_purple", "#483D8B"),
    ("dark_gray", "#404040"),
    ("dark_grey", "#404040"),
    ("light_blue", "#ADD8E6"),
    ("light_green", "#90EE90"),
    ("light_red", "#FFB6C1"),
    ("light_purple", "#DDA0DD"),
    ("light_gray", "#D3D3D3"),
    ("light_grey", "#D3D3D3"),
];
