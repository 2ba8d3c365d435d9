/// Color Module - Data-Oriented Programming (DOP) style
///
/// - color_data.rs: the canonical color value
/// - color_operations.rs: parsing and conversion functions

pub mod color_data;
pub mod color_operations;

pub use color_data::{Color, NAMED_COLORS};

pub use color_operations::{
    // Parsing
    parse_color,
    is_valid_color,
    canonicalize,

    // Conversion
    to_argb,
    to_canonical_string,
    background_argb,

    // Completion
    color_suggestions,
};
