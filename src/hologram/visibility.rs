//! Observer visibility evaluator

use super::hologram_data::{HologramData, Visibility};
use crate::constants::permissions::VIEW_PERMISSION_PREFIX;
use crate::host::Observer;
use crate::world::distance_in_world;

/// Capability an observer needs to see a PERMISSION hologram
pub fn view_permission(id: &str) -> String {
    format!("{}{}", VIEW_PERMISSION_PREFIX, id)
}

/// Whether `observer` may see the hologram
///
/// A positive visibility distance is checked first and applies to every mode.
/// An observer in another world counts as out of range.
pub fn can_view(data: &HologramData, observer: &dyn Observer) -> bool {
    if data.visibility_distance > 0 {
        if let Some(location) = &data.location {
            let in_range = distance_in_world(observer.location(), location)
                .map_or(false, |d| d <= data.visibility_distance as f64);
            if !in_range {
                return false;
            }
        }
    }

    match data.visibility {
        Visibility::All => true,
        Visibility::Permission => observer.has_permission(&view_permission(&data.id)),
        Visibility::World => data
            .location
            .as_ref()
            .map_or(false, |l| l.world == observer.location().world),
        Visibility::None => false,
    }
}
