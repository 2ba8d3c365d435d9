//! Public API facade
//!
//! Thin typed entry points over the registry for embedding code. Edits go
//! through [`HologramApi::edit`] and only show after
//! [`HologramApi::refresh`] or [`HologramApi::update_text`].

use crate::error::HologramResult;
use crate::hologram::{self, HologramData, HologramKind, SharedHologram};
use crate::registry::HologramRegistry;
use crate::world::Location;
use std::sync::Arc;

#[derive(Clone)]
pub struct HologramApi {
    registry: Arc<HologramRegistry>,
}

impl HologramApi {
    pub fn new(registry: Arc<HologramRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HologramRegistry {
        &self.registry
    }

    // Creation

    /// Create a text hologram showing `lines`
    pub fn create_text(
        &self,
        id: &str,
        location: Location,
        lines: &[&str],
    ) -> HologramResult<SharedHologram> {
        self.registry
            .create_with(id, HologramKind::Text, location, |data| {
                for line in lines {
                    hologram::add_line(data, line);
                }
            })
    }

    pub fn create_item(&self, id: &str, location: Location) -> HologramResult<SharedHologram> {
        self.registry.create(id, HologramKind::Item, location)
    }

    pub fn create_block(&self, id: &str, location: Location) -> HologramResult<SharedHologram> {
        self.registry.create(id, HologramKind::Block, location)
    }

    // Queries

    pub fn exists(&self, id: &str) -> bool {
        self.registry.exists(id)
    }

    pub fn get(&self, id: &str) -> Option<SharedHologram> {
        self.registry.get(id)
    }

    pub fn list(&self) -> Vec<SharedHologram> {
        self.registry.list_all()
    }

    pub fn nearby(&self, center: &Location, radius: f64) -> Vec<SharedHologram> {
        self.registry.nearby(center, radius)
    }

    // Editing

    pub fn delete(&self, id: &str) -> bool {
        self.registry.delete(id)
    }

    /// Apply an edit without re-rendering
    pub fn edit<R>(
        &self,
        id: &str,
        edit: impl FnOnce(&mut HologramData) -> HologramResult<R>,
    ) -> HologramResult<R> {
        self.registry.with_hologram(id, edit)
    }

    pub fn refresh(&self, id: &str) -> HologramResult<bool> {
        self.registry.refresh(id)
    }

    pub fn update_text(&self, id: &str) -> HologramResult<bool> {
        self.registry.update_text(id)
    }

    pub fn move_to(&self, id: &str, location: Location) -> HologramResult<()> {
        self.registry.move_to(id, location)
    }

    pub fn clone_hologram(
        &self,
        source_id: &str,
        new_id: &str,
        location: Location,
    ) -> HologramResult<SharedHologram> {
        self.registry.clone_hologram(source_id, new_id, location)
    }

    pub fn toggle(&self, id: &str) -> HologramResult<bool> {
        self.registry.toggle(id)
    }

    // Lifecycle

    pub fn save(&self) -> HologramResult<usize> {
        self.registry.save_all()
    }

    /// Drop everything in memory and load from storage again
    ///
    /// Unsaved changes are lost.
    pub fn reload(&self) -> HologramResult<usize> {
        self.registry.remove_all();
        self.registry.load_all()
    }

    /// Save, then despawn and forget everything
    ///
    /// Holograms are removed even when the save fails; the save error is
    /// still returned.
    pub fn shutdown(&self) -> HologramResult<usize> {
        let saved = self.registry.save_all();
        self.registry.remove_all();
        saved
    }
}
