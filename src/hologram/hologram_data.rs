//! Hologram Data - Pure data structures, no behavior
//!
//! Everything a hologram is: identity, transform, display configuration,
//! per-line overrides and the runtime render state. All transformations live
//! in `hologram_operations` and `render_operations`.

use crate::constants::layout::DEFAULT_LINE_SPACING;
use crate::host::RenderHandle;
use crate::world::Location;
use glam::Vec3;
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Shared handle to one hologram as stored in the registry
pub type SharedHologram = Arc<Mutex<HologramData>>;

/// What a hologram displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HologramKind {
    Text,
    Item,
    Block,
}

impl HologramKind {
    /// Stored name of the kind
    pub fn name(self) -> &'static str {
        match self {
            HologramKind::Text => "TEXT",
            HologramKind::Item => "ITEM",
            HologramKind::Block => "BLOCK",
        }
    }

    /// Case-insensitive lookup; no fallback since an unknown kind is fatal for a record
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "TEXT" => Some(HologramKind::Text),
            "ITEM" => Some(HologramKind::Item),
            "BLOCK" => Some(HologramKind::Block),
            _ => None,
        }
    }
}

impl fmt::Display for HologramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Who may see a hologram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    All,
    /// Observer needs the `view.<id>` capability
    Permission,
    /// Observer must be in the hologram's world
    World,
    /// Never shown automatically
    None,
}

impl Visibility {
    pub fn name(self) -> &'static str {
        match self {
            Visibility::All => "ALL",
            Visibility::Permission => "PERMISSION",
            Visibility::World => "WORLD",
            Visibility::None => "NONE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "ALL" => Some(Visibility::All),
            "PERMISSION" | "PERMISSION_NEEDED" => Some(Visibility::Permission),
            "WORLD" => Some(Visibility::World),
            "NONE" | "MANUAL" => Some(Visibility::None),
            _ => None,
        }
    }
}

/// How a display turns to follow observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Billboard {
    Fixed,
    #[default]
    Vertical,
    Horizontal,
    Center,
}

impl Billboard {
    pub fn name(self) -> &'static str {
        match self {
            Billboard::Fixed => "FIXED",
            Billboard::Vertical => "VERTICAL",
            Billboard::Horizontal => "HORIZONTAL",
            Billboard::Center => "CENTER",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "FIXED" => Some(Billboard::Fixed),
            "VERTICAL" => Some(Billboard::Vertical),
            "HORIZONTAL" => Some(Billboard::Horizontal),
            "CENTER" => Some(Billboard::Center),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlignment {
    pub fn name(self) -> &'static str {
        match self {
            TextAlignment::Left => "LEFT",
            TextAlignment::Center => "CENTER",
            TextAlignment::Right => "RIGHT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "LEFT" => Some(TextAlignment::Left),
            "CENTER" => Some(TextAlignment::Center),
            "RIGHT" => Some(TextAlignment::Right),
            _ => None,
        }
    }
}

/// Single scale axis, for per-axis line scale edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Display configuration applied to freshly created holograms
///
/// Enum fields are stored by name so a config file can carry them verbatim;
/// unknown names fall back to the enum default when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HologramDefaults {
    pub billboard: String,
    pub text_alignment: String,
    pub visibility: String,
    pub visibility_distance: i32,
    pub scale: [f32; 3],
    pub translation: [f32; 3],
    pub shadow_radius: f32,
    pub shadow_strength: f32,
    pub background: String,
    pub text_shadow: bool,
    pub see_through: bool,
    pub line_spacing: f32,
    pub update_text_interval: i32,
}

impl Default for HologramDefaults {
    fn default() -> Self {
        Self {
            billboard: Billboard::Vertical.name().to_string(),
            text_alignment: TextAlignment::Center.name().to_string(),
            visibility: Visibility::All.name().to_string(),
            visibility_distance: -1,
            scale: [1.0, 1.0, 1.0],
            translation: [0.0, 0.0, 0.0],
            shadow_radius: 0.0,
            shadow_strength: 1.0,
            background: "transparent".to_string(),
            text_shadow: false,
            see_through: false,
            line_spacing: DEFAULT_LINE_SPACING,
            update_text_interval: -1,
        }
    }
}

/// One hologram
///
/// Setters never touch live render handles. A structural change takes effect
/// after `refresh`, a content change after `update_text`.
#[derive(Debug)]
pub struct HologramData {
    // Identity (immutable after creation)
    pub(crate) id: String,
    pub(crate) kind: HologramKind,

    // Transform
    pub location: Option<Location>,
    pub scale: Vec3,
    pub translation: Vec3,
    pub shadow_radius: f32,
    pub shadow_strength: f32,

    // Visibility
    pub visibility: Visibility,
    /// Maximum view distance in blocks, -1 for unlimited
    pub visibility_distance: i32,
    pub billboard: Billboard,
    pub persistent: bool,

    // Text only
    pub(crate) lines: Vec<String>,
    /// Always exactly one entry per line
    pub(crate) line_scales: Vec<Vec3>,
    pub(crate) line_spacing: f32,
    /// Canonical color string
    pub(crate) background: String,
    pub text_shadow: bool,
    pub see_through: bool,
    pub text_alignment: TextAlignment,
    /// Auto-refresh interval in ticks, -1 to disable
    pub update_text_interval: i32,

    // Runtime only
    pub(crate) loaded: bool,
    pub(crate) last_update: Option<Instant>,
    pub(crate) viewers: FxHashSet<String>,
    pub(crate) handles: Vec<RenderHandle>,
}

// Read access to fields guarded by invariants
impl HologramData {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> HologramKind {
        self.kind
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_scales(&self) -> &[Vec3] {
        &self.line_scales
    }

    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn handles(&self) -> &[RenderHandle] {
        &self.handles
    }

    pub fn viewers(&self) -> &FxHashSet<String> {
        &self.viewers
    }

    pub fn is_viewer(&self, observer_id: &str) -> bool {
        self.viewers.contains(observer_id)
    }

    pub fn last_update(&self) -> Option<Instant> {
        self.last_update
    }
}
