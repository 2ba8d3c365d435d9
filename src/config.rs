//! Engine configuration loaded from TOML

use crate::color;
use crate::error::HologramError;
use crate::constants::storage::DEFAULT_STORAGE_FILE;
use crate::constants::timing::DEFAULT_UPDATE_INTERVAL_TICKS;
use crate::hologram::{Billboard, HologramDefaults, TextAlignment, Visibility};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main hologram engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HologramConfig {
    /// Host ticks between registry refresh passes
    pub update_interval_ticks: u32,
    /// Spawn and despawn with region load/unload events
    pub chunk_loading: bool,
    /// Global switch for placeholder substitution
    pub placeholders_enabled: bool,
    /// Flat-file storage location
    pub storage_path: PathBuf,
    /// Settings applied to newly created holograms
    pub defaults: HologramDefaults,
}

impl Default for HologramConfig {
    fn default() -> Self {
        Self {
            update_interval_ticks: DEFAULT_UPDATE_INTERVAL_TICKS,
            chunk_loading: true,
            placeholders_enabled: true,
            storage_path: PathBuf::from(DEFAULT_STORAGE_FILE),
            defaults: HologramDefaults::default(),
        }
    }
}

impl HologramConfig {
    /// Read a TOML config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!(
                "[HologramConfig::load] {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("HologramConfig: failed to read {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("HologramConfig: failed to parse {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration parameters
    ///
    /// Failures carry a [`HologramError::InvalidConfig`] naming the field.
    pub fn validate(&self) -> Result<()> {
        if self.update_interval_ticks == 0 {
            return Err(invalid(
                "update_interval_ticks",
                self.update_interval_ticks,
                "cannot be 0",
            ));
        }

        if self.storage_path.as_os_str().is_empty() {
            return Err(invalid("storage_path", "\"\"", "cannot be empty"));
        }

        let defaults = &self.defaults;
        if defaults.scale.iter().any(|v| *v < 0.0) {
            return Err(invalid(
                "defaults.scale",
                format!("{:?}", defaults.scale),
                "has a negative component",
            ));
        }

        if defaults.shadow_radius < 0.0 {
            return Err(invalid(
                "defaults.shadow_radius",
                defaults.shadow_radius,
                "must not be negative",
            ));
        }
        if defaults.shadow_strength < 0.0 {
            return Err(invalid(
                "defaults.shadow_strength",
                defaults.shadow_strength,
                "must not be negative",
            ));
        }

        if !color::is_valid_color(&defaults.background) {
            return Err(invalid(
                "defaults.background",
                &defaults.background,
                "is not a valid color",
            ));
        }

        // Unknown enum names are tolerated but fall back silently later
        if Billboard::from_name(&defaults.billboard).is_none() {
            log::warn!(
                "[HologramConfig::validate] Unknown billboard '{}', VERTICAL will be used",
                defaults.billboard
            );
        }
        if TextAlignment::from_name(&defaults.text_alignment).is_none() {
            log::warn!(
                "[HologramConfig::validate] Unknown text alignment '{}', CENTER will be used",
                defaults.text_alignment
            );
        }
        if Visibility::from_name(&defaults.visibility).is_none() {
            log::warn!(
                "[HologramConfig::validate] Unknown visibility '{}', ALL will be used",
                defaults.visibility
            );
        }

        log::info!("[HologramConfig] Configuration validated successfully");
        Ok(())
    }
}

fn invalid(field: &str, value: impl std::fmt::Display, reason: &str) -> anyhow::Error {
    anyhow::Error::new(HologramError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}
