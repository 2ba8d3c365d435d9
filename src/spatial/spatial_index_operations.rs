//! Spatial Index Operations - Pure DOP functions

use super::spatial_index_data::SpatialIndex;
use crate::hologram::HologramData;
use crate::world::{region_key_of, RegionKey};

/// File a hologram under the region of its current location
///
/// No-op without a location. A hologram already filed elsewhere is moved, so
/// it is never in more than one bucket.
pub fn add(index: &SpatialIndex, data: &HologramData) {
    let Some(location) = &data.location else {
        return;
    };
    let key = region_key_of(location);

    if let Some(previous) = index.placement.insert(data.id.clone(), key.clone()) {
        if previous != key {
            detach(index, &previous, &data.id);
        }
    }

    index
        .buckets
        .entry(key)
        .or_default()
        .insert(data.id.clone());
}

/// Take a hologram out of whatever bucket it is filed under
///
/// Returns false if it was not indexed.
pub fn remove(index: &SpatialIndex, id: &str) -> bool {
    match index.placement.remove(id) {
        Some((_, key)) => {
            detach(index, &key, id);
            true
        }
        None => false,
    }
}

/// Remove then add, after the hologram's location changed
pub fn reindex(index: &SpatialIndex, data: &HologramData) {
    remove(index, &data.id);
    add(index, data);
}

/// Snapshot of the ids filed under `key`, sorted
pub fn entities_in(index: &SpatialIndex, key: &RegionKey) -> Vec<String> {
    let mut ids: Vec<String> = index
        .buckets
        .get(key)
        .map(|bucket| bucket.iter().cloned().collect())
        .unwrap_or_default();
    ids.sort();
    ids
}

/// Region a hologram is currently filed under
pub fn region_of(index: &SpatialIndex, id: &str) -> Option<RegionKey> {
    index.placement.get(id).map(|key| key.clone())
}

pub fn clear(index: &SpatialIndex) {
    index.buckets.clear();
    index.placement.clear();
}

/// Number of non-empty buckets
pub fn region_count(index: &SpatialIndex) -> usize {
    index.buckets.len()
}

pub fn indexed_count(index: &SpatialIndex) -> usize {
    index.placement.len()
}

fn detach(index: &SpatialIndex, key: &RegionKey, id: &str) {
    if let Some(mut bucket) = index.buckets.get_mut(key) {
        bucket.remove(id);
    }
    index.buckets.remove_if(key, |_, bucket| bucket.is_empty());
}
