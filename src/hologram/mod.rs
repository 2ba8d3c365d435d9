/// Hologram Module - Data-Oriented Programming (DOP) style
///
/// - hologram_data.rs: the entity data and its enums
/// - hologram_operations.rs: construction, property and line edits, layout
/// - render_operations.rs: the Unloaded/Loaded render state machine
/// - visibility.rs: the per-observer visibility predicate
///
/// Property edits never touch live render handles. Callers batch their edits
/// and then call `refresh` (structural changes) or `update_text` (content only).

pub mod hologram_data;
pub mod hologram_operations;
pub mod render_operations;
pub mod visibility;

pub use hologram_data::{
    Axis, Billboard, HologramData, HologramDefaults, HologramKind, SharedHologram,
    TextAlignment, Visibility,
};

pub use hologram_operations::{
    // Construction
    create_hologram,
    copy_display_settings,

    // Text lines
    add_line,
    insert_line,
    remove_line,
    set_line,
    set_lines,
    clear_lines,

    // Per-line scale
    line_scale,
    set_line_scale,
    set_line_scale_axis,

    // Properties
    set_background,
    set_line_spacing,
    set_location,
    set_uniform_scale,

    // Layout
    line_offsets,
    display_settings,
};

pub use render_operations::{
    spawn, despawn, refresh, toggle, update_text, update_for_player, needs_update,
    RenderContext, ViewerUpdate,
};

pub use visibility::{can_view, view_permission};
