//! Hologram Operations - Pure DOP functions
//!
//! Construction, property setters, text-line edits and line layout. Nothing
//! here talks to the host; see `render_operations` for that.

use super::hologram_data::{
    Axis, Billboard, HologramData, HologramDefaults, HologramKind, TextAlignment, Visibility,
};
use crate::color;
use crate::constants::layout::{
    BASE_LINE_PADDING, MIN_LINE_SCALE, MIN_LINE_SPACING, OVERSIZE_PADDING_FACTOR,
    VIEW_RANGE_DIVISOR,
};
use crate::error::{HologramError, HologramResult};
use crate::host::DisplaySettings;
use crate::world::Location;
use glam::Vec3;
use rustc_hash::FxHashSet;

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Create an Unloaded hologram with the configured defaults
pub fn create_hologram(
    id: &str,
    kind: HologramKind,
    location: Option<Location>,
    defaults: &HologramDefaults,
) -> HologramData {
    let background = color::canonicalize(&defaults.background).unwrap_or_else(|_| {
        log::warn!(
            "[hologram::create_hologram] Invalid default background '{}', using transparent",
            defaults.background
        );
        "transparent".to_string()
    });

    HologramData {
        id: id.to_string(),
        kind,
        location,
        scale: Vec3::from_array(defaults.scale),
        translation: Vec3::from_array(defaults.translation),
        shadow_radius: defaults.shadow_radius,
        shadow_strength: defaults.shadow_strength,
        visibility: Visibility::from_name(&defaults.visibility).unwrap_or_default(),
        visibility_distance: defaults.visibility_distance,
        billboard: Billboard::from_name(&defaults.billboard).unwrap_or_default(),
        persistent: true,
        lines: Vec::new(),
        line_scales: Vec::new(),
        line_spacing: defaults.line_spacing.max(0.0),
        background,
        text_shadow: defaults.text_shadow,
        see_through: defaults.see_through,
        text_alignment: TextAlignment::from_name(&defaults.text_alignment).unwrap_or_default(),
        update_text_interval: defaults.update_text_interval,
        loaded: false,
        last_update: None,
        viewers: FxHashSet::default(),
        handles: Vec::new(),
    }
}

/// Copy every display field from `source` onto `target`
///
/// Identity, kind, location and runtime state of `target` are left alone.
pub fn copy_display_settings(source: &HologramData, target: &mut HologramData) {
    target.scale = source.scale;
    target.translation = source.translation;
    target.shadow_radius = source.shadow_radius;
    target.shadow_strength = source.shadow_strength;
    target.visibility = source.visibility;
    target.visibility_distance = source.visibility_distance;
    target.billboard = source.billboard;
    target.persistent = source.persistent;
    target.lines = source.lines.clone();
    target.line_scales = source.line_scales.clone();
    target.line_spacing = source.line_spacing;
    target.background = source.background.clone();
    target.text_shadow = source.text_shadow;
    target.see_through = source.see_through;
    target.text_alignment = source.text_alignment;
    target.update_text_interval = source.update_text_interval;
}

// ============================================================================
// TEXT LINES
// ============================================================================

fn invalid_line(data: &HologramData, index: usize) -> HologramError {
    HologramError::InvalidLine {
        id: data.id.clone(),
        index,
        line_count: data.lines.len(),
    }
}

/// Append a line
pub fn add_line(data: &mut HologramData, text: &str) {
    data.lines.push(text.to_string());
    data.line_scales.push(Vec3::ONE);
}

/// Insert a line before `index`; `index == line count` appends
pub fn insert_line(data: &mut HologramData, index: usize, text: &str) -> HologramResult<()> {
    if index > data.lines.len() {
        return Err(invalid_line(data, index));
    }
    data.lines.insert(index, text.to_string());
    data.line_scales.insert(index, Vec3::ONE);
    Ok(())
}

/// Remove a line and its scale override, returning the removed text
pub fn remove_line(data: &mut HologramData, index: usize) -> HologramResult<String> {
    if index >= data.lines.len() {
        return Err(invalid_line(data, index));
    }
    data.line_scales.remove(index);
    Ok(data.lines.remove(index))
}

/// Replace the text of an existing line
pub fn set_line(data: &mut HologramData, index: usize, text: &str) -> HologramResult<()> {
    match data.lines.get_mut(index) {
        Some(line) => {
            *line = text.to_string();
            Ok(())
        }
        None => Err(invalid_line(data, index)),
    }
}

/// Replace all lines, keeping scale overrides of surviving indices
pub fn set_lines(data: &mut HologramData, lines: Vec<String>) {
    data.line_scales.resize(lines.len(), Vec3::ONE);
    data.lines = lines;
}

pub fn clear_lines(data: &mut HologramData) {
    data.lines.clear();
    data.line_scales.clear();
}

// ============================================================================
// PER-LINE SCALE
// ============================================================================

/// Scale override of a line, (1, 1, 1) when the line does not exist
pub fn line_scale(data: &HologramData, index: usize) -> Vec3 {
    data.line_scales.get(index).copied().unwrap_or(Vec3::ONE)
}

pub fn set_line_scale(data: &mut HologramData, index: usize, scale: Vec3) -> HologramResult<()> {
    if index >= data.lines.len() {
        return Err(invalid_line(data, index));
    }
    data.line_scales[index] = scale;
    Ok(())
}

pub fn set_line_scale_axis(
    data: &mut HologramData,
    index: usize,
    axis: Axis,
    value: f32,
) -> HologramResult<()> {
    let mut scale = line_scale(data, index);
    match axis {
        Axis::X => scale.x = value,
        Axis::Y => scale.y = value,
        Axis::Z => scale.z = value,
    }
    set_line_scale(data, index, scale)
}

// ============================================================================
// PROPERTIES
// ============================================================================

/// Set the background from any accepted color string
///
/// Invalid input is rejected and the current background kept.
pub fn set_background(data: &mut HologramData, input: &str) -> HologramResult<()> {
    data.background = color::canonicalize(input)?;
    Ok(())
}

/// Set the vertical spacing between lines; negative values clamp to zero
pub fn set_line_spacing(data: &mut HologramData, spacing: f32) {
    data.line_spacing = spacing.max(0.0);
}

/// Change the location without touching the spatial index
///
/// Callers holding the entity in a registry must reindex afterwards.
pub fn set_location(data: &mut HologramData, location: Location) {
    data.location = Some(location);
}

pub fn set_uniform_scale(data: &mut HologramData, scale: f32) {
    data.scale = Vec3::splat(scale);
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Vertical offset of every line relative to the hologram location
///
/// The first line sits at 0; each following line is pushed down by the
/// spacing times the previous line's effective height plus padding, which
/// grows with oversized lines so they never overlap.
pub fn line_offsets(data: &HologramData) -> Vec<f32> {
    let spacing = data.line_spacing.max(MIN_LINE_SPACING);
    let mut offset = 0.0;
    let mut offsets = Vec::with_capacity(data.lines.len());

    for index in 0..data.lines.len() {
        offsets.push(offset);

        let effective = (data.scale.y * line_scale(data, index).y).max(MIN_LINE_SCALE);
        let padding = if effective > 1.0 {
            effective * OVERSIZE_PADDING_FACTOR
        } else {
            BASE_LINE_PADDING
        };
        offset -= spacing * effective + padding;
    }

    offsets
}

/// Settings bundle for one handle; `line` selects a text line's scale override
pub fn display_settings(data: &HologramData, line: Option<usize>) -> DisplaySettings {
    let scale = match line {
        Some(index) => data.scale * line_scale(data, index),
        None => data.scale,
    };

    DisplaySettings {
        billboard: data.billboard,
        alignment: data.text_alignment,
        background_argb: color::background_argb(&data.background),
        text_shadow: data.text_shadow,
        see_through: data.see_through,
        scale,
        translation: data.translation,
        shadow_radius: data.shadow_radius,
        shadow_strength: data.shadow_strength,
        view_range: (data.visibility_distance > 0)
            .then(|| data.visibility_distance as f32 / VIEW_RANGE_DIVISOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::location;

    fn text_hologram(lines: &[&str]) -> HologramData {
        let mut data = create_hologram(
            "sign",
            HologramKind::Text,
            Some(location("world", 0.0, 64.0, 0.0)),
            &HologramDefaults::default(),
        );
        for line in lines {
            add_line(&mut data, line);
        }
        data
    }

    #[test]
    fn test_defaults_applied() {
        let data = text_hologram(&[]);
        assert_eq!(data.scale, Vec3::ONE);
        assert_eq!(data.translation, Vec3::ZERO);
        assert_eq!(data.billboard, Billboard::Vertical);
        assert_eq!(data.text_alignment, TextAlignment::Center);
        assert_eq!(data.visibility, Visibility::All);
        assert_eq!(data.visibility_distance, -1);
        assert_eq!(data.background(), "transparent");
        assert_eq!(data.line_spacing(), 0.25);
        assert!(data.persistent);
        assert!(!data.is_loaded());
    }

    #[test]
    fn test_line_scale_invariant() {
        let mut data = text_hologram(&["a", "b"]);
        assert_eq!(data.line_scales().len(), 2);

        insert_line(&mut data, 0, "top").expect("insert at head");
        insert_line(&mut data, 3, "bottom").expect("insert at end");
        assert_eq!(data.lines(), &["top", "a", "b", "bottom"]);
        assert_eq!(data.line_scales().len(), data.lines().len());

        set_line_scale(&mut data, 2, Vec3::splat(2.0)).expect("valid index");
        remove_line(&mut data, 0).expect("valid index");
        assert_eq!(data.line_scales().len(), 3);
        // Override follows its line
        assert_eq!(line_scale(&data, 1), Vec3::splat(2.0));

        set_lines(&mut data, vec!["x".to_string()]);
        assert_eq!(data.line_scales().len(), 1);

        clear_lines(&mut data);
        assert!(data.line_scales().is_empty());
    }

    #[test]
    fn test_out_of_range_leaves_entity_unchanged() {
        let mut data = text_hologram(&["Hello", "World"]);

        assert!(matches!(
            set_line(&mut data, 2, "x"),
            Err(HologramError::InvalidLine { index: 2, line_count: 2, .. })
        ));
        assert!(remove_line(&mut data, 5).is_err());
        assert!(insert_line(&mut data, 3, "x").is_err());
        assert!(set_line_scale_axis(&mut data, 2, Axis::Y, 3.0).is_err());

        assert_eq!(data.lines(), &["Hello", "World"]);
        assert_eq!(data.line_scales(), &[Vec3::ONE, Vec3::ONE]);
    }

    #[test]
    fn test_line_offsets() {
        let mut data = text_hologram(&["a", "b", "c"]);
        let offsets = line_offsets(&data);
        assert_eq!(offsets.len(), 3);
        assert_eq!(offsets[0], 0.0);
        assert!((offsets[1] - -0.30).abs() < 1e-6);
        assert!((offsets[2] - -0.60).abs() < 1e-6);

        // An oversized first line pushes the rest further down
        set_line_scale_axis(&mut data, 0, Axis::Y, 2.0).expect("valid index");
        let offsets = line_offsets(&data);
        assert!((offsets[1] - -0.70).abs() < 1e-6);

        // Spacing is clamped to a small positive floor
        set_line_spacing(&mut data, -3.0);
        assert_eq!(data.line_spacing(), 0.0);
        let offsets = line_offsets(&data);
        assert!(offsets[2] < offsets[1]);
    }

    #[test]
    fn test_display_settings() {
        let mut data = text_hologram(&["a"]);
        data.scale = Vec3::new(2.0, 2.0, 2.0);
        set_line_scale(&mut data, 0, Vec3::new(1.0, 0.5, 1.0)).expect("valid index");
        set_background(&mut data, "rgb(255,0,0)").expect("valid color");
        data.visibility_distance = 32;

        let settings = display_settings(&data, Some(0));
        assert_eq!(settings.scale, Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(settings.background_argb, 0xFFFF0000);
        assert_eq!(settings.view_range, Some(2.0));

        assert_eq!(display_settings(&data, None).scale, Vec3::splat(2.0));

        data.visibility_distance = -1;
        assert_eq!(display_settings(&data, None).view_range, None);
    }

    #[test]
    fn test_invalid_background_rejected() {
        let mut data = text_hologram(&[]);
        set_background(&mut data, "blue").expect("named color");
        assert!(set_background(&mut data, "not-a-color").is_err());
        assert_eq!(data.background(), "#0000FF");
    }

    #[test]
    fn test_copy_display_settings() {
        let mut source = text_hologram(&["one", "two"]);
        source.billboard = Billboard::Fixed;
        source.visibility = Visibility::World;
        set_line_scale(&mut source, 1, Vec3::splat(3.0)).expect("valid index");

        let mut target = create_hologram(
            "copy",
            HologramKind::Text,
            Some(location("world", 10.0, 64.0, 10.0)),
            &HologramDefaults::default(),
        );
        copy_display_settings(&source, &mut target);

        assert_eq!(target.id(), "copy");
        assert_eq!(target.lines(), source.lines());
        assert_eq!(target.line_scales(), source.line_scales());
        assert_eq!(target.billboard, Billboard::Fixed);
        assert_eq!(target.visibility, Visibility::World);
        assert_eq!(target.location, Some(location("world", 10.0, 64.0, 10.0)));
    }
}
