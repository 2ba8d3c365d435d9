//! Color operations - Pure DOP functions
//!
//! Parses the small color DSL used for hologram backgrounds:
//! `transparent`, named colors, `#RRGGBB`, `#AARRGGBB` and `rgb(r, g, b)`.

use super::color_data::{Color, NAMED_COLORS};
use crate::error::{HologramError, HologramResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RGB_PATTERN: Regex =
        Regex::new(r"^rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)$").expect("valid rgb pattern");
    static ref HEX_PATTERN: Regex =
        Regex::new(r"^#?([a-f0-9]{8}|[a-f0-9]{6})$").expect("valid hex pattern");
}

const TRANSPARENT: &str = "transparent";

// ============================================================================
// PARSING
// ============================================================================

/// Parse a color string into a canonical [`Color`]
///
/// Returns `None` for anything the DSL does not recognise. An empty input is
/// treated as `transparent`.
pub fn parse_color(input: &str) -> Option<Color> {
    let color = input.trim().to_lowercase();

    if color.is_empty() || color == TRANSPARENT {
        return Some(Color::Transparent);
    }

    if let Some(caps) = RGB_PATTERN.captures(&color) {
        let channel = |i: usize| -> Option<u8> {
            caps.get(i)
                .and_then(|m| m.as_str().parse::<u32>().ok())
                .and_then(|v| u8::try_from(v).ok())
        };
        return match (channel(1), channel(2), channel(3)) {
            (Some(r), Some(g), Some(b)) => Some(Color::Rgb { r, g, b }),
            _ => None,
        };
    }

    if let Some(caps) = HEX_PATTERN.captures(&color) {
        return caps.get(1).and_then(|m| parse_hex_digits(m.as_str()));
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == color)
        .and_then(|(_, hex)| parse_hex_digits(&hex[1..]))
}

/// Check whether a string is accepted by [`parse_color`]
pub fn is_valid_color(input: &str) -> bool {
    parse_color(input).is_some()
}

/// Parse and re-render a color in its canonical string form
pub fn canonicalize(input: &str) -> HologramResult<String> {
    parse_color(input)
        .map(|c| to_canonical_string(&c))
        .ok_or_else(|| HologramError::InvalidColor {
            value: input.to_string(),
        })
}

fn parse_hex_digits(hex: &str) -> Option<Color> {
    let value = u32::from_str_radix(hex, 16).ok()?;
    let [a, r, g, b] = value.to_be_bytes();
    match hex.len() {
        6 => Some(Color::Rgb { r, g, b }),
        8 => Some(Color::Argb { a, r, g, b }),
        _ => None,
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Canonical string form: `transparent`, `#RRGGBB` or `#AARRGGBB`
pub fn to_canonical_string(color: &Color) -> String {
    match *color {
        Color::Transparent => TRANSPARENT.to_string(),
        Color::Rgb { r, g, b } => format!("#{:02X}{:02X}{:02X}", r, g, b),
        Color::Argb { a, r, g, b } => format!("#{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
    }
}

/// Packed ARGB value as consumed by the host renderer
pub fn to_argb(color: &Color) -> u32 {
    match *color {
        Color::Transparent => 0,
        Color::Rgb { r, g, b } => u32::from_be_bytes([0xFF, r, g, b]),
        Color::Argb { a, r, g, b } => u32::from_be_bytes([a, r, g, b]),
    }
}

/// ARGB value for a stored background string, transparent when unparsable
pub fn background_argb(background: &str) -> u32 {
    match parse_color(background) {
        Some(color) => to_argb(&color),
        None => {
            log::warn!(
                "[color::background_argb] Unparsable background '{}', using transparent",
                background
            );
            0
        }
    }
}

// ============================================================================
// COMPLETION
// ============================================================================

/// Color names and format examples starting with `input`
pub fn color_suggestions(input: &str) -> Vec<String> {
    let lower = input.trim().to_lowercase();

    let mut suggestions: Vec<String> = std::iter::once(TRANSPARENT)
        .chain(NAMED_COLORS.iter().map(|(name, _)| *name))
        .filter(|name| name.starts_with(&lower))
        .map(str::to_string)
        .collect();

    if lower.is_empty() {
        return suggestions;
    }

    if "rgb".starts_with(&lower) {
        suggestions.push("rgb(255,0,0)".to_string());
    }

    if "#".starts_with(&lower) || "hex".starts_with(&lower) {
        suggestions.extend(["#FF0000", "#00FF00", "#0000FF"].map(str::to_string));
    }

    suggestions
}
