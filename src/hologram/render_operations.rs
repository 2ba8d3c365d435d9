//! Render state machine
//!
//! A hologram is either Unloaded (no handles) or Loaded (one handle per text
//! line, or one handle for an item/block). Every host call goes through here.

use super::hologram_data::{HologramData, HologramKind};
use super::hologram_operations::{display_settings, line_offsets};
use super::visibility::can_view;
use crate::constants::timing::TICK_MILLIS;
use crate::error::{HologramError, HologramResult};
use crate::host::{HologramHost, HostResult, Observer, RenderHandle};
use crate::placeholder::PlaceholderResolver;
use crate::world::{offset_y, Location};
use std::time::{Duration, Instant};

/// Collaborators injected into every render operation
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub host: &'a dyn HologramHost,
    /// `None` disables placeholder substitution
    pub placeholders: Option<&'a dyn PlaceholderResolver>,
}

impl<'a> RenderContext<'a> {
    pub fn new(host: &'a dyn HologramHost) -> Self {
        Self {
            host,
            placeholders: None,
        }
    }

    pub fn with_placeholders(mut self, placeholders: &'a dyn PlaceholderResolver) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    fn render_text(&self, observer: Option<&dyn Observer>, text: &str) -> String {
        match self.placeholders {
            Some(resolver) => resolver.substitute(observer, text),
            None => text.to_string(),
        }
    }
}

/// Outcome of re-evaluating one observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerUpdate {
    Shown,
    Hidden,
    Unchanged,
}

/// Handles created during one spawn, removed again unless committed
struct SpawnGuard<'a> {
    host: &'a dyn HologramHost,
    handles: Vec<RenderHandle>,
}

impl<'a> SpawnGuard<'a> {
    fn commit(mut self) -> Vec<RenderHandle> {
        std::mem::take(&mut self.handles)
    }
}

impl Drop for SpawnGuard<'_> {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            self.host.remove(handle);
        }
    }
}

// ============================================================================
// SPAWN / DESPAWN
// ============================================================================

/// Create render handles for an Unloaded hologram
///
/// Returns `Ok(false)` when nothing was done (no location, or already Loaded).
/// A world the host cannot resolve fails before any handle is created. On a
/// host failure every handle created so far is removed again and the
/// hologram stays Unloaded.
pub fn spawn(data: &mut HologramData, ctx: &RenderContext) -> HologramResult<bool> {
    if data.loaded {
        return Ok(false);
    }
    let Some(base) = data.location.clone() else {
        return Ok(false);
    };
    // No hologram, even an empty one, loads into a world the host cannot resolve
    if !ctx.host.world_exists(&base.world) {
        return Err(HologramError::WorldNotFound { world: base.world });
    }

    let mut guard = SpawnGuard {
        host: ctx.host,
        handles: Vec::with_capacity(data.lines.len().max(1)),
    };

    let result = match data.kind {
        HologramKind::Text => spawn_lines(data, ctx, &base, &mut guard),
        HologramKind::Item | HologramKind::Block => ctx
            .host
            .spawn_display(data.kind, &base, &display_settings(data, None))
            .map(|handle| guard.handles.push(handle)),
    };

    if let Err(e) = result {
        log::warn!(
            "[hologram::spawn] Spawn of '{}' failed after {} handles: {}",
            data.id,
            guard.handles.len(),
            e
        );
        return Err(HologramError::SpawnFailed {
            id: data.id.clone(),
            error: e.to_string(),
        });
    }

    data.handles = guard.commit();
    data.loaded = true;
    log::debug!(
        "[hologram::spawn] Spawned '{}' with {} handles",
        data.id,
        data.handles.len()
    );
    Ok(true)
}

fn spawn_lines(
    data: &HologramData,
    ctx: &RenderContext,
    base: &Location,
    guard: &mut SpawnGuard,
) -> HostResult<()> {
    for (index, offset) in line_offsets(data).into_iter().enumerate() {
        let text = ctx.render_text(None, &data.lines[index]);
        let settings = display_settings(data, Some(index));
        let handle = ctx
            .host
            .spawn_text(&offset_y(base, offset as f64), &text, &settings)?;
        guard.handles.push(handle);
    }
    Ok(())
}

/// Remove every render handle and forget all viewers
///
/// Safe on an Unloaded hologram.
pub fn despawn(data: &mut HologramData, host: &dyn HologramHost) {
    for handle in data.handles.drain(..) {
        if host.is_valid(handle) {
            host.remove(handle);
        }
    }
    data.viewers.clear();
    if data.loaded {
        log::debug!("[hologram::despawn] Despawned '{}'", data.id);
    }
    data.loaded = false;
}

/// Despawn and spawn again; only acts on a Loaded hologram
pub fn refresh(data: &mut HologramData, ctx: &RenderContext) -> HologramResult<bool> {
    if !data.loaded {
        return Ok(false);
    }
    despawn(data, ctx.host);
    spawn(data, ctx)
}

/// Flip between Loaded and Unloaded, returning the new state
pub fn toggle(data: &mut HologramData, ctx: &RenderContext) -> HologramResult<bool> {
    if data.loaded {
        despawn(data, ctx.host);
    } else {
        spawn(data, ctx)?;
    }
    Ok(data.loaded)
}

// ============================================================================
// TEXT UPDATES
// ============================================================================

/// Re-render line text in place without observer context
///
/// Returns false for Unloaded or non-text holograms.
pub fn update_text(data: &mut HologramData, ctx: &RenderContext, now: Instant) -> bool {
    if !data.loaded || data.kind != HologramKind::Text {
        return false;
    }

    for (line, &handle) in data.lines.iter().zip(&data.handles) {
        if ctx.host.is_valid(handle) {
            ctx.host.set_text(handle, &ctx.render_text(None, line));
        }
    }
    data.last_update = Some(now);
    true
}

/// True when the auto-refresh interval has elapsed since the last update
pub fn needs_update(data: &HologramData, now: Instant) -> bool {
    if data.update_text_interval <= 0 {
        return false;
    }
    let interval = Duration::from_millis(data.update_text_interval as u64 * TICK_MILLIS);
    match data.last_update {
        Some(last) => now.saturating_duration_since(last) >= interval,
        None => true,
    }
}

// ============================================================================
// OBSERVERS
// ============================================================================

/// Re-evaluate one observer against a Loaded hologram
///
/// Viewer tracking only. Handles stay visible to everyone; when placeholders
/// are active the shared line text is re-rendered for this observer and
/// overwritten by the next observer or global update.
pub fn update_for_player(
    data: &mut HologramData,
    ctx: &RenderContext,
    observer: &dyn Observer,
) -> ViewerUpdate {
    if !data.loaded {
        return ViewerUpdate::Unchanged;
    }

    if !can_view(data, observer) {
        return if data.viewers.remove(observer.observer_id()) {
            ViewerUpdate::Hidden
        } else {
            ViewerUpdate::Unchanged
        };
    }

    let change = if data.viewers.insert(observer.observer_id().to_string()) {
        ViewerUpdate::Shown
    } else {
        ViewerUpdate::Unchanged
    };

    if ctx.placeholders.is_some() && data.kind == HologramKind::Text {
        for (line, &handle) in data.lines.iter().zip(&data.handles) {
            if ctx.host.is_valid(handle) {
                ctx.host
                    .set_text(handle, &ctx.render_text(Some(observer), line));
            }
        }
    }

    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hologram::{
        add_line, create_hologram, remove_line, set_line, HologramDefaults, Visibility,
    };
    use crate::host::{InMemoryHost, ObserverSnapshot};
    use crate::placeholder::MapPlaceholders;
    use crate::world::location;

    fn hologram(kind: HologramKind, lines: &[&str]) -> HologramData {
        let mut data = create_hologram(
            "sign1",
            kind,
            Some(location("world", 0.5, 64.0, 0.5)),
            &HologramDefaults::default(),
        );
        for line in lines {
            add_line(&mut data, line);
        }
        data
    }

    #[test]
    fn test_sign_scenario() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let ctx = RenderContext::new(&host);
        let mut data = hologram(HologramKind::Text, &["Hello", "World"]);

        assert!(spawn(&mut data, &ctx).expect("spawn"));
        assert_eq!(data.handles().len(), 2);
        assert_eq!(host.live_count(), 2);

        set_line(&mut data, 0, "Hi").expect("valid index");
        refresh(&mut data, &ctx).expect("refresh");
        assert_eq!(data.handles().len(), 2);
        assert_eq!(host.text_of(data.handles()[0]).as_deref(), Some("Hi"));

        remove_line(&mut data, 1).expect("valid index");
        refresh(&mut data, &ctx).expect("refresh");
        assert_eq!(data.handles().len(), 1);
        assert_eq!(host.live_count(), 1);
    }

    #[test]
    fn test_spawn_and_despawn_idempotent() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let ctx = RenderContext::new(&host);
        let mut data = hologram(HologramKind::Text, &["a", "b", "c"]);

        spawn(&mut data, &ctx).expect("spawn");
        assert!(!spawn(&mut data, &ctx).expect("second spawn"));
        assert_eq!(data.handles().len(), 3);
        assert_eq!(host.live_count(), 3);

        despawn(&mut data, &host);
        despawn(&mut data, &host);
        assert!(!data.is_loaded());
        assert!(data.handles().is_empty());
        assert!(data.viewers().is_empty());
        assert_eq!(host.live_count(), 0);
    }

    #[test]
    fn test_lines_stack_downwards() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let mut data = hologram(HologramKind::Text, &["top", "bottom"]);
        spawn(&mut data, &RenderContext::new(&host)).expect("spawn");

        let top = host.display(data.handles()[0]).expect("live display");
        let bottom = host.display(data.handles()[1]).expect("live display");
        assert_eq!(top.location.position.y, 64.0);
        assert!(bottom.location.position.y < top.location.position.y);
    }

    #[test]
    fn test_partial_spawn_rolls_back() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let ctx = RenderContext::new(&host);
        let mut data = hologram(HologramKind::Text, &["1", "2", "3"]);

        host.fail_spawns_after(2);
        match spawn(&mut data, &ctx) {
            Err(HologramError::SpawnFailed { id, .. }) => assert_eq!(id, "sign1"),
            other => panic!("Unexpected result: {:?}", other),
        }
        assert!(!data.is_loaded());
        assert!(data.handles().is_empty());
        assert_eq!(host.live_count(), 0);

        host.clear_spawn_failures();
        assert!(spawn(&mut data, &ctx).expect("spawn"));
        assert_eq!(host.live_count(), 3);
    }

    #[test]
    fn test_spawn_without_location_or_world() {
        let host = InMemoryHost::new();
        let ctx = RenderContext::new(&host);

        let mut data = hologram(HologramKind::Text, &["a"]);
        data.location = None;
        assert!(!spawn(&mut data, &ctx).expect("no-op"));

        let mut data = hologram(HologramKind::Text, &["a"]);
        assert!(spawn(&mut data, &ctx).is_err());
        assert!(!data.is_loaded());
    }

    #[test]
    fn test_empty_text_in_missing_world_stays_unloaded() {
        let host = InMemoryHost::new();
        let ctx = RenderContext::new(&host);
        let mut data = hologram(HologramKind::Text, &[]);

        match spawn(&mut data, &ctx) {
            Err(HologramError::WorldNotFound { world }) => assert_eq!(world, "world"),
            other => panic!("Unexpected result: {:?}", other),
        }
        assert!(!data.is_loaded());

        host.add_world("world");
        assert!(spawn(&mut data, &ctx).expect("spawn"));
        assert!(data.is_loaded());
        assert!(data.handles().is_empty());
    }

    #[test]
    fn test_despawn_skips_invalidated_handles() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let ctx = RenderContext::new(&host);
        let mut data = hologram(HologramKind::Text, &["a", "b", "c"]);
        spawn(&mut data, &ctx).expect("spawn");

        // The host dropped one display on its own
        host.invalidate(data.handles()[1]);
        assert_eq!(host.live_count(), 2);

        despawn(&mut data, &host);
        assert_eq!(host.removed_count(), 2);
        assert_eq!(host.live_count(), 0);
        assert!(!data.is_loaded());
        assert!(data.handles().is_empty());
    }

    #[test]
    fn test_item_and_empty_text() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let ctx = RenderContext::new(&host);

        let mut item = hologram(HologramKind::Item, &[]);
        spawn(&mut item, &ctx).expect("spawn");
        assert_eq!(item.handles().len(), 1);
        let display = host.display(item.handles()[0]).expect("live display");
        assert_eq!(display.kind, HologramKind::Item);
        assert!(!update_text(&mut item, &ctx, Instant::now()));

        let mut empty = hologram(HologramKind::Text, &[]);
        assert!(spawn(&mut empty, &ctx).expect("spawn"));
        assert!(empty.is_loaded());
        assert!(empty.handles().is_empty());
    }

    #[test]
    fn test_toggle() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let ctx = RenderContext::new(&host);
        let mut data = hologram(HologramKind::Block, &[]);

        assert!(toggle(&mut data, &ctx).expect("toggle on"));
        assert_eq!(host.live_count(), 1);
        assert!(!toggle(&mut data, &ctx).expect("toggle off"));
        assert_eq!(host.live_count(), 0);
    }

    #[test]
    fn test_update_text_uses_placeholders() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let placeholders = MapPlaceholders::new();
        placeholders.set("online", "3");
        let ctx = RenderContext::new(&host).with_placeholders(&placeholders);

        let mut data = hologram(HologramKind::Text, &["Online: %online%"]);
        spawn(&mut data, &ctx).expect("spawn");
        assert_eq!(host.text_of(data.handles()[0]).as_deref(), Some("Online: 3"));

        placeholders.set("online", "4");
        let now = Instant::now();
        assert!(update_text(&mut data, &ctx, now));
        assert_eq!(host.text_of(data.handles()[0]).as_deref(), Some("Online: 4"));
        assert_eq!(data.last_update(), Some(now));

        // Without a resolver the raw text goes through
        let plain = RenderContext::new(&host);
        update_text(&mut data, &plain, now);
        assert_eq!(
            host.text_of(data.handles()[0]).as_deref(),
            Some("Online: %online%")
        );
    }

    #[test]
    fn test_update_text_unloaded_is_noop() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let mut data = hologram(HologramKind::Text, &["a"]);
        assert!(!update_text(&mut data, &RenderContext::new(&host), Instant::now()));
        assert_eq!(data.last_update(), None);
    }

    #[test]
    fn test_needs_update() {
        let mut data = hologram(HologramKind::Text, &["a"]);
        let start = Instant::now();
        assert!(!needs_update(&data, start));

        data.update_text_interval = 20;
        assert!(needs_update(&data, start));

        data.last_update = Some(start);
        assert!(!needs_update(&data, start + Duration::from_millis(999)));
        assert!(needs_update(&data, start + Duration::from_millis(1000)));
    }

    #[test]
    fn test_update_for_player_tracks_viewers() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let ctx = RenderContext::new(&host);
        let mut data = hologram(HologramKind::Text, &["a"]);
        let steve = ObserverSnapshot::new("steve", location("world", 1.0, 64.0, 1.0));

        // Unloaded holograms track nobody
        assert_eq!(update_for_player(&mut data, &ctx, &steve), ViewerUpdate::Unchanged);
        assert!(data.viewers().is_empty());

        spawn(&mut data, &ctx).expect("spawn");
        assert_eq!(update_for_player(&mut data, &ctx, &steve), ViewerUpdate::Shown);
        assert_eq!(update_for_player(&mut data, &ctx, &steve), ViewerUpdate::Unchanged);
        assert!(data.is_viewer("steve"));

        data.visibility = Visibility::None;
        assert_eq!(update_for_player(&mut data, &ctx, &steve), ViewerUpdate::Hidden);
        assert!(!data.is_viewer("steve"));
    }

    #[test]
    fn test_observer_text_is_last_writer_wins() {
        let host = InMemoryHost::with_worlds(&["world"]);
        let placeholders = MapPlaceholders::new();
        let ctx = RenderContext::new(&host).with_placeholders(&placeholders);
        let mut data = hologram(HologramKind::Text, &["Hello %observer%"]);
        spawn(&mut data, &ctx).expect("spawn");

        let steve = ObserverSnapshot::new("steve", location("world", 0.0, 64.0, 0.0));
        let alex = ObserverSnapshot::new("alex", location("world", 0.0, 64.0, 0.0));
        update_for_player(&mut data, &ctx, &steve);
        update_for_player(&mut data, &ctx, &alex);

        assert_eq!(host.text_of(data.handles()[0]).as_deref(), Some("Hello alex"));
        assert_eq!(data.viewers().len(), 2);
    }
}
