//! Record Operations - conversion between records and live holograms

use super::record_data::{HologramRecord, LocationRecord};
use crate::color;
use crate::error::{HologramError, HologramResult};
use crate::hologram::{
    create_hologram, Billboard, HologramData, HologramDefaults, HologramKind, TextAlignment,
    Visibility,
};
use crate::host::HologramHost;
use crate::world::{location_with_rotation, Location};
use glam::{DVec3, Vec3};

/// Flatten a hologram into its stored shape; runtime state is dropped
pub fn to_record(data: &HologramData) -> HologramRecord {
    let mut record = HologramRecord {
        id: data.id.clone(),
        kind: data.kind.name().to_string(),
        location: data.location.as_ref().map(location_record),
        visibility_distance: data.visibility_distance,
        visibility: data.visibility.name().to_string(),
        persistent: data.persistent,
        scale_x: data.scale.x,
        scale_y: data.scale.y,
        scale_z: data.scale.z,
        translation_x: data.translation.x,
        translation_y: data.translation.y,
        translation_z: data.translation.z,
        shadow_radius: data.shadow_radius,
        shadow_strength: data.shadow_strength,
        billboard: data.billboard.name().to_string(),
        ..HologramRecord::default()
    };

    if data.kind == HologramKind::Text {
        record.text = Some(data.lines.clone());
        record.text_shadow = Some(data.text_shadow);
        record.see_through = Some(data.see_through);
        record.text_alignment = Some(data.text_alignment.name().to_string());
        record.update_text_interval = Some(data.update_text_interval);
        record.background = Some(data.background.clone());
        record.line_spacing = Some(data.line_spacing);
        record.line_scales = Some(data.line_scales.iter().map(|s| s.to_array()).collect());
    }

    record
}

/// Rebuild an Unloaded hologram from a record
///
/// An unknown kind or a world the host cannot resolve rejects the whole
/// record. A record without a location loads unplaced. Bad enum or color
/// values fall back to defaults.
pub fn from_record(record: &HologramRecord, host: &dyn HologramHost) -> HologramResult<HologramData> {
    let kind = HologramKind::from_name(&record.kind).ok_or_else(|| HologramError::UnknownKind {
        value: record.kind.clone(),
    })?;

    if let Some(stored) = &record.location {
        if !host.world_exists(&stored.world) {
            return Err(HologramError::WorldNotFound {
                world: stored.world.clone(),
            });
        }
    }

    let mut data = create_hologram(
        &record.id,
        kind,
        record.location.as_ref().map(location_of),
        &HologramDefaults::default(),
    );

    data.visibility_distance = record.visibility_distance;
    data.visibility = enum_or_default(&record.id, "visibility", &record.visibility, Visibility::from_name);
    data.persistent = record.persistent;
    data.scale = Vec3::new(record.scale_x, record.scale_y, record.scale_z);
    data.translation = Vec3::new(record.translation_x, record.translation_y, record.translation_z);
    data.shadow_radius = record.shadow_radius;
    data.shadow_strength = record.shadow_strength;
    data.billboard = enum_or_default(&record.id, "billboard", &record.billboard, Billboard::from_name);

    if kind == HologramKind::Text {
        data.lines = record.text.clone().unwrap_or_default();
        data.line_scales = record
            .line_scales
            .as_ref()
            .map(|scales| scales.iter().map(|s| Vec3::from_array(*s)).collect())
            .unwrap_or_default();
        data.line_scales.resize(data.lines.len(), Vec3::ONE);

        data.text_shadow = record.text_shadow.unwrap_or(false);
        data.see_through = record.see_through.unwrap_or(false);
        if let Some(alignment) = &record.text_alignment {
            data.text_alignment =
                enum_or_default(&record.id, "text_alignment", alignment, TextAlignment::from_name);
        }
        data.update_text_interval = record.update_text_interval.unwrap_or(-1);
        if let Some(spacing) = record.line_spacing {
            data.line_spacing = spacing.max(0.0);
        }
        if let Some(background) = &record.background {
            data.background = color::canonicalize(background).unwrap_or_else(|_| {
                log::warn!(
                    "[persistence::from_record] '{}' has invalid background '{}', using transparent",
                    record.id,
                    background
                );
                "transparent".to_string()
            });
        }
    }

    Ok(data)
}

fn enum_or_default<T: Default>(id: &str, field: &str, value: &str, parse: fn(&str) -> Option<T>) -> T {
    parse(value).unwrap_or_else(|| {
        log::warn!(
            "[persistence::from_record] '{}' has invalid {} '{}', using default",
            id,
            field,
            value
        );
        T::default()
    })
}

fn location_record(location: &Location) -> LocationRecord {
    LocationRecord {
        world: location.world.clone(),
        x: location.position.x,
        y: location.position.y,
        z: location.position.z,
        yaw: location.yaw,
        pitch: location.pitch,
    }
}

fn location_of(stored: &LocationRecord) -> Location {
    location_with_rotation(
        &stored.world,
        DVec3::new(stored.x, stored.y, stored.z),
        stored.yaw,
        stored.pitch,
    )
}
