use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;

use crate::application::ports::DraftStore;
use crate::domain::entities::DraftRecord;
use crate::domain::value_objects::DraftKey;
use crate::shared::error::{AppError, Result};

/// In-memory draft store. Keeps records in their serialized form so it
/// mirrors the durable adapter's semantics exactly, including corrupt-record
/// discard. Used by tests and as a fallback when no database is wired.
#[derive(Default)]
pub struct MemoryDraftStore {
    slots: Mutex<HashMap<String, String>>,
    saves: AtomicUsize,
    fail_next_save: AtomicBool,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes accepted so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make the next `save` fail with a storage error, simulating quota
    /// exhaustion or similar transient trouble.
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    /// Insert a raw (possibly invalid) serialized record under `key`.
    pub fn insert_raw(&self, key: &DraftKey, raw: &str) {
        self.lock_slots().insert(key.as_str().to_string(), raw.to_string());
    }

    /// The most recently written record, if any slot holds a parseable one.
    pub fn last_saved_record(&self) -> Option<DraftRecord> {
        self.lock_slots()
            .values()
            .find_map(|raw| serde_json::from_str(raw).ok())
    }

    fn lock_slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn load(&self, key: &DraftKey) -> Result<Option<DraftRecord>> {
        let raw = match self.lock_slots().get(key.as_str()).cloned() {
            Some(raw) => raw,
            None => return Ok(None),
        };
        match serde_json::from_str::<DraftRecord>(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!(%key, "discarding corrupt draft record: {err}");
                self.lock_slots().remove(key.as_str());
                Ok(None)
            }
        }
    }

    async fn save(&self, key: &DraftKey, record: &DraftRecord) -> Result<()> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(AppError::Storage("draft store write rejected".to_string()));
        }
        let raw = serde_json::to_string(record)?;
        self.lock_slots().insert(key.as_str().to_string(), raw);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &DraftKey) -> Result<()> {
        self.lock_slots().remove(key.as_str());
        Ok(())
    }
}
