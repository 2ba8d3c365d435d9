//! Host interface data
//!
//! Render handles, the display-settings bundle applied to every spawned
//! handle, and the host trait itself.

use crate::hologram::{Billboard, HologramKind, TextAlignment};
use crate::world::Location;
use glam::Vec3;
use std::fmt;

/// Opaque host-side reference to one spawned display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderHandle(pub u64);

impl fmt::Display for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display#{}", self.0)
    }
}

/// Everything the host needs to configure one display handle
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub billboard: Billboard,
    pub alignment: TextAlignment,
    /// Packed ARGB, 0 for transparent
    pub background_argb: u32,
    pub text_shadow: bool,
    pub see_through: bool,
    /// Base scale multiplied by the per-line override
    pub scale: Vec3,
    pub translation: Vec3,
    pub shadow_radius: f32,
    pub shadow_strength: f32,
    /// Host view range, unset for unlimited visibility
    pub view_range: Option<f32>,
}

/// Host errors surfaced while spawning
#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    #[error("World not loaded: {0}")]
    WorldNotLoaded(String),

    #[error("Spawn rejected: {0}")]
    SpawnRejected(String),
}

pub type HostResult<T> = Result<T, HostError>;

/// World-rendering host consumed by the engine
///
/// Handle creation and removal must only be driven from the host's main
/// simulation thread.
pub trait HologramHost: Send + Sync {
    /// Whether a world with this name is currently available
    fn world_exists(&self, world: &str) -> bool;

    /// Spawn one text display
    fn spawn_text(
        &self,
        location: &Location,
        text: &str,
        settings: &DisplaySettings,
    ) -> HostResult<RenderHandle>;

    /// Spawn one item or block display
    fn spawn_display(
        &self,
        kind: HologramKind,
        location: &Location,
        settings: &DisplaySettings,
    ) -> HostResult<RenderHandle>;

    /// Replace the text of a live text display
    fn set_text(&self, handle: RenderHandle, text: &str);

    /// Whether the handle still refers to a live display
    fn is_valid(&self, handle: RenderHandle) -> bool;

    /// Remove a display
    fn remove(&self, handle: RenderHandle);
}
