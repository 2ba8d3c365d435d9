//! World Data Types - Pure DOP Structures
//!
//! These are the data structures that world_operations functions operate on.
//! NO METHODS - just pure data.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in a named world with an orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Host world name
    pub world: String,

    /// Continuous world coordinates
    pub position: DVec3,

    /// Horizontal rotation in degrees
    pub yaw: f32,

    /// Vertical rotation in degrees
    pub pitch: f32,
}

/// Region (chunk column) identifier used as a spatial grouping key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionKey {
    pub world: String,
    pub x: i64,
    pub z: i64,
}

/// Integer block cell an observer occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockCell {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}", self.world, self.x, self.z)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.1}, {:.1}, {:.1})",
            self.world, self.position.x, self.position.y, self.position.z
        )
    }
}
