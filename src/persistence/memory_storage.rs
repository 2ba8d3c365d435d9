//! In-memory storage for headless use and tests

use super::record_data::HologramRecord;
use super::{HologramStorage, PersistenceError, PersistenceResult};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Default)]
pub struct MemoryStorage {
    records: Mutex<Vec<HologramRecord>>,
    fail_saves: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<HologramRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Current stored set
    pub fn records(&self) -> Vec<HologramRecord> {
        self.records.lock().clone()
    }

    /// Make every following save fail
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }
}

impl HologramStorage for MemoryStorage {
    fn load_records(&self) -> PersistenceResult<Vec<HologramRecord>> {
        Ok(self.records())
    }

    fn save_records(&self, records: &[HologramRecord]) -> PersistenceResult<()> {
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err(PersistenceError::SaveFailed("storage unavailable".to_string()));
        }
        *self.records.lock() = records.to_vec();
        Ok(())
    }
}
