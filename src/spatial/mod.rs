/// Spatial Index Module - Data-Oriented Programming (DOP) style
///
/// Region key -> hologram ids, plus the reverse placement of every id so a
/// hologram can always be removed from the bucket it was filed under, even
/// after its location changed.

pub mod spatial_index_data;
pub mod spatial_index_operations;

pub use spatial_index_data::SpatialIndex;

pub use spatial_index_operations::{
    add, remove, reindex, entities_in, region_of, clear, region_count, indexed_count,
};
