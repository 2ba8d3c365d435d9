//! Error handling for the hologram engine
//!
//! Every expected failure (duplicate id, unknown id, bad line index, bad color)
//! is a variant here, so callers can branch on it instead of catching panics.

use std::error::Error as StdError;
use std::fmt;

use crate::persistence::PersistenceError;

/// Main error type for hologram operations
#[derive(Debug)]
pub enum HologramError {
    // Registry Errors
    AlreadyExists {
        id: String,
    },
    NotFound {
        id: String,
    },

    // Entity Errors
    InvalidLine {
        id: String,
        index: usize,
        line_count: usize,
    },
    SpawnFailed {
        id: String,
        error: String,
    },

    // Input Errors
    InvalidColor {
        value: String,
    },
    UnknownKind {
        value: String,
    },
    WorldNotFound {
        world: String,
    },

    // Persistence Errors
    Persistence(PersistenceError),

    // Configuration Errors
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    // Generic fallback for unexpected errors
    Internal {
        message: String,
    },
}

impl fmt::Display for HologramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HologramError::AlreadyExists { id } => {
                write!(f, "Hologram '{}' already exists", id)
            }
            HologramError::NotFound { id } => write!(f, "Hologram '{}' not found", id),

            HologramError::InvalidLine {
                id,
                index,
                line_count,
            } => write!(
                f,
                "Invalid line {} for hologram '{}' ({} lines)",
                index, id, line_count
            ),
            HologramError::SpawnFailed { id, error } => {
                write!(f, "Spawn failed for hologram '{}': {}", id, error)
            }

            HologramError::InvalidColor { value } => {
                write!(f, "Invalid color: '{}'", value)
            }
            HologramError::UnknownKind { value } => {
                write!(f, "Unknown hologram type: '{}'", value)
            }
            HologramError::WorldNotFound { world } => write!(f, "World not found: {}", world),

            HologramError::Persistence(e) => write!(f, "Persistence error: {}", e),

            HologramError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "Invalid config: {} = {} ({})", field, value, reason),

            HologramError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl StdError for HologramError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            HologramError::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

/// Type alias for Results in the hologram engine
pub type HologramResult<T> = Result<T, HologramError>;

impl From<PersistenceError> for HologramError {
    fn from(err: PersistenceError) -> Self {
        HologramError::Persistence(err)
    }
}

impl From<crate::host::HostError> for HologramError {
    fn from(err: crate::host::HostError) -> Self {
        match err {
            crate::host::HostError::WorldNotLoaded(world) => HologramError::WorldNotFound { world },
            other => HologramError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Convert a missing hologram lookup into a `NotFound` error
pub trait OptionExt<T> {
    fn ok_or_not_found(self, id: &str) -> HologramResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, id: &str) -> HologramResult<T> {
        self.ok_or_else(|| HologramError::NotFound { id: id.to_string() })
    }
}
