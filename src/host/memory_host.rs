//! In-memory host
//!
//! Keeps spawned displays in a table instead of a real world. Used by headless
//! deployments and by the test suite, which also relies on its failure
//! injection to exercise partial spawns.

use super::host_data::{DisplaySettings, HologramHost, HostError, HostResult, RenderHandle};
use crate::hologram::HologramKind;
use crate::world::Location;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// One display held by the in-memory host
#[derive(Debug, Clone)]
pub struct SpawnedDisplay {
    pub kind: HologramKind,
    pub location: Location,
    pub text: Option<String>,
    pub settings: DisplaySettings,
}

/// Host implementation backed by concurrent tables
pub struct InMemoryHost {
    worlds: RwLock<FxHashSet<String>>,
    displays: DashMap<RenderHandle, SpawnedDisplay>,
    next_handle: AtomicU64,
    /// Remaining successful spawns before the host starts rejecting
    spawn_budget: Mutex<Option<usize>>,
    removed: AtomicU64,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self {
            worlds: RwLock::new(FxHashSet::default()),
            displays: DashMap::new(),
            next_handle: AtomicU64::new(1),
            spawn_budget: Mutex::new(None),
            removed: AtomicU64::new(0),
        }
    }

    /// Create a host with the given worlds already loaded
    pub fn with_worlds(worlds: &[&str]) -> Self {
        let host = Self::new();
        for world in worlds {
            host.add_world(world);
        }
        host
    }

    pub fn add_world(&self, world: &str) {
        self.worlds.write().insert(world.to_string());
    }

    pub fn remove_world(&self, world: &str) {
        self.worlds.write().remove(world);
    }

    /// Allow `count` more spawns, then reject every further spawn
    pub fn fail_spawns_after(&self, count: usize) {
        *self.spawn_budget.lock() = Some(count);
    }

    /// Lift a spawn limit set by [`fail_spawns_after`](Self::fail_spawns_after)
    pub fn clear_spawn_failures(&self) {
        *self.spawn_budget.lock() = None;
    }

    /// Drop a display as if the host had removed it on its own
    pub fn invalidate(&self, handle: RenderHandle) {
        self.displays.remove(&handle);
    }

    /// Number of live displays
    pub fn live_count(&self) -> usize {
        self.displays.len()
    }

    /// Number of removals requested through the host interface
    pub fn removed_count(&self) -> u64 {
        self.removed.load(Ordering::Relaxed)
    }

    pub fn display(&self, handle: RenderHandle) -> Option<SpawnedDisplay> {
        self.displays.get(&handle).map(|d| d.clone())
    }

    pub fn text_of(&self, handle: RenderHandle) -> Option<String> {
        self.displays.get(&handle).and_then(|d| d.text.clone())
    }

    fn take_spawn_slot(&self, location: &Location) -> HostResult<RenderHandle> {
        if !self.world_exists(&location.world) {
            return Err(HostError::WorldNotLoaded(location.world.clone()));
        }

        let mut budget = self.spawn_budget.lock();
        if let Some(remaining) = budget.as_mut() {
            if *remaining == 0 {
                return Err(HostError::SpawnRejected("spawn limit reached".to_string()));
            }
            *remaining -= 1;
        }

        Ok(RenderHandle(self.next_handle.fetch_add(1, Ordering::Relaxed)))
    }
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HologramHost for InMemoryHost {
    fn world_exists(&self, world: &str) -> bool {
        self.worlds.read().contains(world)
    }

    fn spawn_text(
        &self,
        location: &Location,
        text: &str,
        settings: &DisplaySettings,
    ) -> HostResult<RenderHandle> {
        let handle = self.take_spawn_slot(location)?;
        self.displays.insert(
            handle,
            SpawnedDisplay {
                kind: HologramKind::Text,
                location: location.clone(),
                text: Some(text.to_string()),
                settings: settings.clone(),
            },
        );
        Ok(handle)
    }

    fn spawn_display(
        &self,
        kind: HologramKind,
        location: &Location,
        settings: &DisplaySettings,
    ) -> HostResult<RenderHandle> {
        let handle = self.take_spawn_slot(location)?;
        self.displays.insert(
            handle,
            SpawnedDisplay {
                kind,
                location: location.clone(),
                text: None,
                settings: settings.clone(),
            },
        );
        Ok(handle)
    }

    fn set_text(&self, handle: RenderHandle, text: &str) {
        if let Some(mut display) = self.displays.get_mut(&handle) {
            display.text = Some(text.to_string());
        }
    }

    fn is_valid(&self, handle: RenderHandle) -> bool {
        self.displays.contains_key(&handle)
    }

    fn remove(&self, handle: RenderHandle) {
        self.removed.fetch_add(1, Ordering::Relaxed);
        self.displays.remove(&handle);
    }
}
