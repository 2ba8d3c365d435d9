//! JSON flat-file storage
//!
//! One file holding a versioned envelope keyed by hologram id. Saves go to a
//! sibling temp file that is renamed over the target, so a failed save never
//! clobbers the previous file. Records are decoded one at a time; a malformed
//! record is logged and skipped.

use super::record_data::HologramRecord;
use super::{HologramStorage, PersistenceError, PersistenceResult};
use crate::constants::storage::FORMAT_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct StorageEnvelope<R> {
    version: u32,
    /// RFC 3339 timestamp of the save
    saved_at: String,
    holograms: BTreeMap<String, R>,
}

pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl HologramStorage for JsonFileStorage {
    fn load_records(&self) -> PersistenceResult<Vec<HologramRecord>> {
        if !self.path.exists() {
            log::info!(
                "[JsonFileStorage::load_records] {} does not exist, starting empty",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let envelope: StorageEnvelope<serde_json::Value> = serde_json::from_str(&contents)
            .map_err(|e| PersistenceError::DeserializationError(e.to_string()))?;

        if envelope.version != FORMAT_VERSION {
            return Err(PersistenceError::VersionMismatch {
                expected: FORMAT_VERSION.to_string(),
                found: envelope.version.to_string(),
            });
        }

        let total = envelope.holograms.len();
        let mut records = Vec::with_capacity(total);
        for (id, value) in envelope.holograms {
            match serde_json::from_value::<HologramRecord>(value) {
                Ok(record) => records.push(HologramRecord { id, ..record }),
                Err(e) => log::warn!(
                    "[JsonFileStorage::load_records] Skipping malformed record '{}': {}",
                    id,
                    e
                ),
            }
        }

        if records.len() < total {
            log::warn!(
                "[JsonFileStorage::load_records] Read {} of {} records from {}",
                records.len(),
                total,
                self.path.display()
            );
        }
        Ok(records)
    }

    fn save_records(&self, records: &[HologramRecord]) -> PersistenceResult<()> {
        let mut holograms = BTreeMap::new();
        for record in records {
            if holograms.insert(record.id.clone(), record.clone()).is_some() {
                return Err(PersistenceError::CorruptedData(format!(
                    "duplicate hologram id '{}'",
                    record.id
                )));
            }
        }

        let envelope = StorageEnvelope {
            version: FORMAT_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            holograms,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.temp_path();
        let written = write_envelope(&temp_path, &envelope).and_then(|()| {
            std::fs::rename(&temp_path, &self.path).map_err(|e| {
                PersistenceError::SaveFailed(format!(
                    "could not replace {}: {}",
                    self.path.display(),
                    e
                ))
            })
        });

        if let Err(e) = written {
            if let Err(cleanup) = std::fs::remove_file(&temp_path) {
                log::debug!(
                    "[JsonFileStorage::save_records] Could not remove {}: {}",
                    temp_path.display(),
                    cleanup
                );
            }
            return Err(e);
        }

        log::debug!(
            "[JsonFileStorage::save_records] Wrote {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn write_envelope(
    path: &Path,
    envelope: &StorageEnvelope<HologramRecord>,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, envelope)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| PersistenceError::IoError(e.to_string()))?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::LocationRecord;
    use tempfile::TempDir;

    fn record(id: &str) -> HologramRecord {
        HologramRecord {
            id: id.to_string(),
            location: Some(LocationRecord {
                world: "world".to_string(),
                x: 1.0,
                y: 64.0,
                z: 1.0,
                yaw: 0.0,
                pitch: 0.0,
            }),
            text: Some(vec!["Hello".to_string()]),
            ..HologramRecord::default()
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("holograms.json"));
        assert!(storage.load_records().expect("load").is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("data").join("holograms.json"));

        storage
            .save_records(&[record("b"), record("a")])
            .expect("save");
        assert!(!storage.temp_path().exists());

        let loaded = storage.load_records().expect("load");
        let ids: Vec<&str> = loaded.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(loaded[0].text, Some(vec!["Hello".to_string()]));

        // Second save replaces the first
        storage.save_records(&[record("c")]).expect("save");
        assert_eq!(storage.load_records().expect("load").len(), 1);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("holograms.json");
        std::fs::write(
            &path,
            r#"{"version":1,"saved_at":"2024-01-01T00:00:00Z","holograms":{
                "old":{"location":{"world":"world","x":0.0,"y":0.0,"z":0.0}}}}"#,
        )
        .expect("write fixture");

        let loaded = JsonFileStorage::new(&path).load_records().expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "old");
        assert_eq!(loaded[0].kind, "TEXT");
        assert_eq!(loaded[0].visibility_distance, -1);
        assert_eq!(loaded[0].shadow_strength, 1.0);
        assert!(loaded[0].persistent);
    }

    #[test]
    fn test_version_mismatch_and_corruption() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("holograms.json");

        std::fs::write(&path, r#"{"version":99,"saved_at":"","holograms":{}}"#).expect("write");
        assert!(matches!(
            JsonFileStorage::new(&path).load_records(),
            Err(PersistenceError::VersionMismatch { .. })
        ));

        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(
            JsonFileStorage::new(&path).load_records(),
            Err(PersistenceError::DeserializationError(_))
        ));
    }

    #[test]
    fn test_malformed_record_is_skipped() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("holograms.json");
        std::fs::write(
            &path,
            r#"{"version":1,"saved_at":"2024-01-01T00:00:00Z","holograms":{
                "good":{"type":"TEXT","location":{"world":"world","x":1.0,"y":64.0,"z":1.0},"text":["hi"]},
                "broken":{"location":{"world":"world","y":64.0,"z":0.0},"visibility_distance":"far"},
                "no_x":{"location":{"world":"world","y":70.0,"z":2.0}}}}"#,
        )
        .expect("write fixture");

        let loaded = JsonFileStorage::new(&path).load_records().expect("load");
        let ids: Vec<&str> = loaded.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["good", "no_x"]);
        assert_eq!(loaded[0].text, Some(vec!["hi".to_string()]));

        let no_x = loaded[1].location.as_ref().expect("stored location");
        assert_eq!((no_x.x, no_x.y, no_x.z), (0.0, 70.0, 2.0));
    }

    #[test]
    fn test_failed_save_removes_temp_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("holograms.json");
        // A non-empty directory in the way makes the final rename fail
        std::fs::create_dir(&path).expect("create dir");
        std::fs::write(path.join("keep"), "x").expect("write");

        let storage = JsonFileStorage::new(&path);
        assert!(matches!(
            storage.save_records(&[record("a")]),
            Err(PersistenceError::SaveFailed(_))
        ));
        assert!(!storage.temp_path().exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_duplicate_ids_rejected_without_writing() {
        let dir = TempDir::new().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("holograms.json"));
        storage.save_records(&[record("a")]).expect("save");

        assert!(storage.save_records(&[record("x"), record("x")]).is_err());
        let loaded = storage.load_records().expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "a");
    }
}
