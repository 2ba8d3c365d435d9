//! Hologram Registry
//!
//! Owns every hologram by id and keeps the spatial index in step with the
//! primary map. All render work is driven from the host's main thread; the
//! concurrent maps only make it safe for an observer-event worker to read.

use crate::config::HologramConfig;
use crate::error::{HologramError, HologramResult, OptionExt};
use crate::hologram::{
    self, copy_display_settings, create_hologram, HologramData, HologramKind, RenderContext,
    SharedHologram, ViewerUpdate,
};
use crate::host::{HologramHost, Observer};
use crate::persistence::{from_record, to_record, HologramStorage, JsonFileStorage};
use crate::placeholder::PlaceholderResolver;
use crate::spatial::{self, SpatialIndex};
use crate::world::{distance_in_world, Location, RegionKey};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

pub struct HologramRegistry {
    holograms: DashMap<String, SharedHologram>,
    spatial: SpatialIndex,
    host: Arc<dyn HologramHost>,
    storage: Arc<dyn HologramStorage>,
    placeholders: Option<Arc<dyn PlaceholderResolver>>,
    config: HologramConfig,
}

impl HologramRegistry {
    pub fn new(
        config: HologramConfig,
        host: Arc<dyn HologramHost>,
        storage: Arc<dyn HologramStorage>,
    ) -> Self {
        Self {
            holograms: DashMap::new(),
            spatial: SpatialIndex::new(),
            host,
            storage,
            placeholders: None,
            config,
        }
    }

    /// Validate `config` and store holograms in the JSON file at its
    /// `storage_path`
    pub fn from_config(config: HologramConfig, host: Arc<dyn HologramHost>) -> HologramResult<Self> {
        config.validate().map_err(|e| match e.downcast::<HologramError>() {
            Ok(err) => err,
            Err(other) => HologramError::InvalidConfig {
                field: "config".to_string(),
                value: String::new(),
                reason: other.to_string(),
            },
        })?;

        let storage = Arc::new(JsonFileStorage::new(config.storage_path.clone()));
        log::info!(
            "[HologramRegistry::from_config] Using storage file {}",
            config.storage_path.display()
        );
        Ok(Self::new(config, host, storage))
    }

    /// Attach a placeholder resolver; ignored while placeholders are disabled
    pub fn with_placeholders(mut self, placeholders: Arc<dyn PlaceholderResolver>) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    pub fn config(&self) -> &HologramConfig {
        &self.config
    }

    pub fn host(&self) -> &dyn HologramHost {
        self.host.as_ref()
    }

    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }

    fn render_context(&self) -> RenderContext<'_> {
        let ctx = RenderContext::new(self.host.as_ref());
        match &self.placeholders {
            Some(resolver) if self.config.placeholders_enabled => {
                ctx.with_placeholders(resolver.as_ref())
            }
            _ => ctx,
        }
    }

    fn snapshot(&self) -> Vec<SharedHologram> {
        self.holograms.iter().map(|entry| entry.value().clone()).collect()
    }

    fn spawn_logged(&self, data: &mut HologramData, caller: &str) {
        if let Err(e) = hologram::spawn(data, &self.render_context()) {
            log::warn!("[HologramRegistry::{}] {}", caller, e);
        }
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Create, index and spawn a hologram with the configured defaults
    pub fn create(
        &self,
        id: &str,
        kind: HologramKind,
        location: Location,
    ) -> HologramResult<SharedHologram> {
        self.create_with(id, kind, location, |_| {})
    }

    /// Like [`create`](Self::create), running `setup` before the first spawn
    ///
    /// A spawn failure is logged and leaves the hologram registered but
    /// Unloaded; a later region load or toggle spawns it.
    pub fn create_with(
        &self,
        id: &str,
        kind: HologramKind,
        location: Location,
        setup: impl FnOnce(&mut HologramData),
    ) -> HologramResult<SharedHologram> {
        let shared = match self.holograms.entry(id.to_string()) {
            Entry::Occupied(_) => {
                return Err(HologramError::AlreadyExists { id: id.to_string() });
            }
            Entry::Vacant(vacant) => {
                let mut data = create_hologram(id, kind, Some(location), &self.config.defaults);
                setup(&mut data);
                spatial::add(&self.spatial, &data);
                let shared = Arc::new(Mutex::new(data));
                vacant.insert(shared.clone());
                shared
            }
        };

        self.spawn_logged(&mut shared.lock(), "create");
        log::debug!("[HologramRegistry::create] Created {} hologram '{}'", kind, id);
        Ok(shared)
    }

    pub fn get(&self, id: &str) -> Option<SharedHologram> {
        self.holograms.get(id).map(|entry| entry.value().clone())
    }

    pub fn exists(&self, id: &str) -> bool {
        self.holograms.contains_key(id)
    }

    /// Despawn and forget a hologram; false if the id is unknown
    pub fn delete(&self, id: &str) -> bool {
        let Some((_, shared)) = self.holograms.remove(id) else {
            return false;
        };
        hologram::despawn(&mut shared.lock(), self.host.as_ref());
        spatial::remove(&self.spatial, id);
        log::debug!("[HologramRegistry::delete] Deleted '{}'", id);
        true
    }

    /// Snapshot of every hologram, ordered by id
    pub fn list_all(&self) -> Vec<SharedHologram> {
        let mut entries: Vec<(String, SharedHologram)> = self
            .holograms
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().map(|(_, shared)| shared).collect()
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.holograms.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.holograms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holograms.is_empty()
    }

    /// Holograms in the same world within `radius`, in discovery order
    ///
    /// Linear scan; the spatial index is not consulted.
    pub fn nearby(&self, center: &Location, radius: f64) -> Vec<SharedHologram> {
        self.snapshot()
            .into_iter()
            .filter(|shared| {
                shared
                    .lock()
                    .location
                    .as_ref()
                    .and_then(|loc| distance_in_world(center, loc))
                    .map_or(false, |d| d <= radius)
            })
            .collect()
    }

    /// Holograms currently filed under a region
    pub fn entities_in(&self, key: &RegionKey) -> Vec<SharedHologram> {
        spatial::entities_in(&self.spatial, key)
            .iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    // ========================================================================
    // EDITING
    // ========================================================================

    /// Run an edit against one hologram under its lock
    ///
    /// Nothing is re-rendered; follow up with `refresh` or `update_text`.
    pub fn with_hologram<R>(
        &self,
        id: &str,
        edit: impl FnOnce(&mut HologramData) -> HologramResult<R>,
    ) -> HologramResult<R> {
        let shared = self.get(id).ok_or_not_found(id)?;
        let mut data = shared.lock();
        edit(&mut *data)
    }

    /// Re-file a hologram after its location changed
    pub fn reindex(&self, id: &str) -> HologramResult<()> {
        let shared = self.get(id).ok_or_not_found(id)?;
        spatial::reindex(&self.spatial, &shared.lock());
        Ok(())
    }

    /// Despawn and spawn a Loaded hologram so structural edits show
    pub fn refresh(&self, id: &str) -> HologramResult<bool> {
        let shared = self.get(id).ok_or_not_found(id)?;
        let mut data = shared.lock();
        hologram::refresh(&mut data, &self.render_context())
    }

    /// Push content-only edits to the live handles
    pub fn update_text(&self, id: &str) -> HologramResult<bool> {
        let shared = self.get(id).ok_or_not_found(id)?;
        let mut data = shared.lock();
        Ok(hologram::update_text(&mut data, &self.render_context(), Instant::now()))
    }

    /// Flip Loaded/Unloaded, returning the new state
    pub fn toggle(&self, id: &str) -> HologramResult<bool> {
        let shared = self.get(id).ok_or_not_found(id)?;
        let mut data = shared.lock();
        hologram::toggle(&mut data, &self.render_context())
    }

    /// Move a hologram, keeping the spatial index and render state in step
    ///
    /// A Loaded hologram is respawned at the new location; an Unloaded one
    /// stays Unloaded.
    pub fn move_to(&self, id: &str, location: Location) -> HologramResult<()> {
        let shared = self.get(id).ok_or_not_found(id)?;
        let mut data = shared.lock();

        let was_loaded = data.is_loaded();
        hologram::despawn(&mut data, self.host.as_ref());
        hologram::set_location(&mut data, location);
        spatial::reindex(&self.spatial, &data);

        if was_loaded {
            hologram::spawn(&mut data, &self.render_context())?;
        }
        Ok(())
    }

    /// Create `new_id` at `location` with every display setting of `source_id`
    pub fn clone_hologram(
        &self,
        source_id: &str,
        new_id: &str,
        location: Location,
    ) -> HologramResult<SharedHologram> {
        let source = self.get(source_id).ok_or_not_found(source_id)?;
        let kind = source.lock().kind();
        self.create_with(new_id, kind, location, |data| {
            copy_display_settings(&source.lock(), data);
        })
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Load every stored record, skipping ones that cannot be rebuilt
    ///
    /// Returns the number of holograms added.
    pub fn load_all(&self) -> HologramResult<usize> {
        let records = self.storage.load_records().map_err(|e| {
            log::error!("[HologramRegistry::load_all] Failed to read storage: {}", e);
            HologramError::from(e)
        })?;

        let mut loaded = 0;
        for record in &records {
            if self.exists(&record.id) {
                log::warn!(
                    "[HologramRegistry::load_all] Skipping '{}': id already registered",
                    record.id
                );
                continue;
            }

            let data = match from_record(record, self.host.as_ref()) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("[HologramRegistry::load_all] Skipping '{}': {}", record.id, e);
                    continue;
                }
            };

            spatial::add(&self.spatial, &data);
            let shared = Arc::new(Mutex::new(data));
            self.holograms.insert(record.id.clone(), shared.clone());
            self.spawn_logged(&mut shared.lock(), "load_all");
            loaded += 1;
        }

        log::info!(
            "[HologramRegistry::load_all] Loaded {} of {} holograms",
            loaded,
            records.len()
        );
        Ok(loaded)
    }

    /// Write every persistent hologram; returns how many were written
    ///
    /// On failure nothing in memory changes.
    pub fn save_all(&self) -> HologramResult<usize> {
        let records: Vec<_> = self
            .list_all()
            .iter()
            .filter_map(|shared| {
                let data = shared.lock();
                data.persistent.then(|| to_record(&data))
            })
            .collect();

        self.storage.save_records(&records).map_err(|e| {
            log::error!("[HologramRegistry::save_all] Failed to save holograms: {}", e);
            HologramError::from(e)
        })?;

        log::info!("[HologramRegistry::save_all] Saved {} holograms", records.len());
        Ok(records.len())
    }

    /// Despawn and forget everything
    pub fn remove_all(&self) {
        let ids: Vec<String> = self.holograms.iter().map(|e| e.key().clone()).collect();
        let mut removed = 0;
        for id in ids {
            if let Some((_, shared)) = self.holograms.remove(&id) {
                hologram::despawn(&mut shared.lock(), self.host.as_ref());
                removed += 1;
            }
        }
        spatial::clear(&self.spatial);
        log::info!("[HologramRegistry::remove_all] Removed {} holograms", removed);
    }

    // ========================================================================
    // EVENTS
    // ========================================================================

    /// Periodic refresh pass
    pub fn tick(&self) -> usize {
        self.tick_at(Instant::now())
    }

    /// Refresh pass at an explicit time; returns how many holograms updated
    pub fn tick_at(&self, now: Instant) -> usize {
        let ctx = self.render_context();
        let mut updated = 0;
        for shared in self.snapshot() {
            let mut data = shared.lock();
            if !data.is_loaded() || !hologram::needs_update(&data, now) {
                continue;
            }
            if hologram::update_text(&mut data, &ctx, now) {
                updated += 1;
            }
        }
        updated
    }

    /// Spawn everything filed under a region that just loaded
    pub fn on_region_load(&self, key: &RegionKey) -> usize {
        if !self.config.chunk_loading {
            return 0;
        }
        let ctx = self.render_context();
        let mut spawned = 0;
        for shared in self.entities_in(key) {
            match hologram::spawn(&mut shared.lock(), &ctx) {
                Ok(true) => spawned += 1,
                Ok(false) => {}
                Err(e) => log::warn!("[HologramRegistry::on_region_load] {}", e),
            }
        }

        if spawned > 0 {
            log::debug!(
                "[HologramRegistry::on_region_load] Spawned {} holograms in {}",
                spawned,
                key
            );
        }
        spawned
    }

    /// Despawn everything filed under a region that just unloaded
    pub fn on_region_unload(&self, key: &RegionKey) -> usize {
        if !self.config.chunk_loading {
            return 0;
        }
        let mut despawned = 0;
        for shared in self.entities_in(key) {
            let mut data = shared.lock();
            if data.is_loaded() {
                despawned += 1;
            }
            hologram::despawn(&mut data, self.host.as_ref());
        }

        if despawned > 0 {
            log::debug!(
                "[HologramRegistry::on_region_unload] Despawned {} holograms in {}",
                despawned,
                key
            );
        }
        despawned
    }

    /// Re-evaluate one observer against every hologram
    ///
    /// Returns how many holograms changed the observer's shown state.
    pub fn on_observer_event(&self, observer: &dyn Observer) -> usize {
        let ctx = self.render_context();
        let mut changed = 0;
        for shared in self.snapshot() {
            let update = hologram::update_for_player(&mut shared.lock(), &ctx, observer);
            if update != ViewerUpdate::Unchanged {
                changed += 1;
            }
        }
        changed
    }
}
