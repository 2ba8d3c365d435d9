//! Persistence Module
//!
//! Flat per-hologram records, their conversion to and from live holograms,
//! and the storage backends the registry loads from and saves to.

// Data modules
pub mod record_data;

// Operations modules
pub mod record_operations;

// Backends
pub mod json_storage;
pub mod memory_storage;

pub use json_storage::JsonFileStorage;
pub use memory_storage::MemoryStorage;
pub use record_data::{HologramRecord, LocationRecord};
pub use record_operations::{from_record, to_record};

pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Save failed: {0}")]
    SaveFailed(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
    #[error("Corrupted data: {0}")]
    CorruptedData(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::IoError(err.to_string())
    }
}

/// Durable store of hologram records
///
/// `save_records` replaces the whole stored set and either fully succeeds or
/// leaves the previous set in place.
pub trait HologramStorage: Send + Sync {
    fn load_records(&self) -> PersistenceResult<Vec<HologramRecord>>;
    fn save_records(&self, records: &[HologramRecord]) -> PersistenceResult<()>;
}
