//! Spatial Index Data - Pure data structures

use crate::world::RegionKey;
use dashmap::DashMap;
use rustc_hash::FxHashSet;

/// Secondary index over the registry's holograms, keyed by region
///
/// Both tables are concurrent so observer events arriving off the main
/// thread can read while the main thread mutates.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    /// Region -> ids filed there; empty buckets are dropped
    pub(crate) buckets: DashMap<RegionKey, FxHashSet<String>>,
    /// Id -> region it is currently filed under
    pub(crate) placement: DashMap<String, RegionKey>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }
}
