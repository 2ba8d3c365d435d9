//! World Module
//!
//! Locations inside named host worlds, and the discrete grids derived from
//! them: block cells for movement filtering and regions (chunk columns) for
//! spatial indexing.

pub mod data_types;
pub mod world_operations;

pub use data_types::{BlockCell, Location, RegionKey};

pub use world_operations::{
    block_cell_of, crossed_block_boundary, distance, distance_in_world, location,
    location_with_rotation, offset_y, region_key, region_key_of, same_world,
};
