//! World Operations - Pure DOP Functions
//!
//! Coordinate conversions and distance queries over [`Location`] data.

use super::data_types::{BlockCell, Location, RegionKey};
use crate::constants::region::REGION_SIZE;
use glam::DVec3;

// ============================================================================
// CONSTRUCTION
// ============================================================================

/// Create a location with zero orientation
pub fn location(world: &str, x: f64, y: f64, z: f64) -> Location {
    Location {
        world: world.to_string(),
        position: DVec3::new(x, y, z),
        yaw: 0.0,
        pitch: 0.0,
    }
}

/// Create a location with an explicit orientation
pub fn location_with_rotation(world: &str, position: DVec3, yaw: f32, pitch: f32) -> Location {
    Location {
        world: world.to_string(),
        position,
        yaw,
        pitch,
    }
}

/// Same location shifted vertically
pub fn offset_y(loc: &Location, dy: f64) -> Location {
    Location {
        position: loc.position + DVec3::new(0.0, dy, 0.0),
        ..loc.clone()
    }
}

// ============================================================================
// GRID CONVERSIONS
// ============================================================================

/// Integer block cell containing a location
pub fn block_cell_of(loc: &Location) -> BlockCell {
    BlockCell {
        x: loc.position.x.floor() as i64,
        y: loc.position.y.floor() as i64,
        z: loc.position.z.floor() as i64,
    }
}

/// Region key for a location: world + floor(x / size) + floor(z / size)
pub fn region_key_of(loc: &Location) -> RegionKey {
    let cell = block_cell_of(loc);
    RegionKey {
        world: loc.world.clone(),
        x: cell.x.div_euclid(REGION_SIZE),
        z: cell.z.div_euclid(REGION_SIZE),
    }
}

/// Region key from host-reported chunk coordinates
pub fn region_key(world: &str, chunk_x: i64, chunk_z: i64) -> RegionKey {
    RegionKey {
        world: world.to_string(),
        x: chunk_x,
        z: chunk_z,
    }
}

/// True if moving between two locations changes the occupied block cell or world
pub fn crossed_block_boundary(from: &Location, to: &Location) -> bool {
    from.world != to.world || block_cell_of(from) != block_cell_of(to)
}

// ============================================================================
// DISTANCE
// ============================================================================

/// True if both locations are in the same world
pub fn same_world(a: &Location, b: &Location) -> bool {
    a.world == b.world
}

/// Euclidean distance ignoring the world name
pub fn distance(a: &Location, b: &Location) -> f64 {
    a.position.distance(b.position)
}

/// Euclidean distance, `None` when the worlds differ
pub fn distance_in_world(a: &Location, b: &Location) -> Option<f64> {
    same_world(a, b).then(|| distance(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_key_negative_coordinates() {
        let key = region_key_of(&location("world", -0.5, 64.0, -17.0));
        assert_eq!(key, region_key("world", -1, -2));

        let key = region_key_of(&location("world", 15.99, 0.0, 16.0));
        assert_eq!(key, region_key("world", 0, 1));
        assert_eq!(key.to_string(), "world:0,1");
    }

    #[test]
    fn test_block_boundary() {
        let a = location("world", 1.2, 64.0, 1.2);
        let b = location("world", 1.8, 64.5, 1.9);
        let c = location("world", 2.1, 64.0, 1.2);
        assert!(!crossed_block_boundary(&a, &b));
        assert!(crossed_block_boundary(&a, &c));
        assert!(crossed_block_boundary(&a, &location("nether", 1.2, 64.0, 1.2)));
    }

    #[test]
    fn test_distance_in_world() {
        let a = location("world", 0.0, 0.0, 0.0);
        let b = location("world", 3.0, 4.0, 0.0);
        assert_eq!(distance_in_world(&a, &b), Some(5.0));
        assert_eq!(distance_in_world(&a, &location("end", 3.0, 4.0, 0.0)), None);
    }
}
