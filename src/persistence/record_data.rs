//! Record Data - the stored shape of one hologram
//!
//! Enum-valued fields stay strings here so an unknown value can fall back to
//! its default at conversion time instead of failing the whole file.

use serde::{Deserialize, Serialize};

/// Stored location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub world: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

/// One stored hologram; missing fields take the documented defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HologramRecord {
    /// Key the record is stored under
    #[serde(skip)]
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,
    pub location: Option<LocationRecord>,
    pub visibility_distance: i32,
    pub visibility: String,
    pub persistent: bool,
    pub scale_x: f32,
    pub scale_y: f32,
    pub scale_z: f32,
    pub translation_x: f32,
    pub translation_y: f32,
    pub translation_z: f32,
    pub shadow_radius: f32,
    pub shadow_strength: f32,
    pub billboard: String,

    // Text only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub see_through: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_text_interval: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_scales: Option<Vec<[f32; 3]>>,
}

impl Default for HologramRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: "TEXT".to_string(),
            location: None,
            visibility_distance: -1,
            visibility: "ALL".to_string(),
            persistent: true,
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
            translation_x: 0.0,
            translation_y: 0.0,
            translation_z: 0.0,
            shadow_radius: 0.0,
            shadow_strength: 1.0,
            billboard: "VERTICAL".to_string(),
            text: None,
            text_shadow: None,
            see_through: None,
            text_alignment: None,
            update_text_interval: None,
            background: None,
            line_spacing: None,
            line_scales: None,
        }
    }
}
