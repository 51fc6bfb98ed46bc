use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::application::ports::DraftStore;
use crate::domain::entities::{DraftPatch, DraftRecord};
use crate::domain::value_objects::DraftKey;
use crate::shared::error::Result;

/// In-memory state slice for the single current draft.
///
/// The four mutators below (`update_draft`, `save_draft`, `load_draft`,
/// `clear_draft`) are the only paths that alter draft state anywhere in the
/// crate. The lock is never held across an await, so dirty reads stay
/// synchronous and the navigation guard can consult them from sync handlers.
pub struct DraftService {
    store: Arc<dyn DraftStore>,
    key: DraftKey,
    state: RwLock<DraftRecord>,
}

impl DraftService {
    pub fn new(store: Arc<dyn DraftStore>, key: DraftKey) -> Self {
        Self {
            store,
            key,
            state: RwLock::new(DraftRecord::empty()),
        }
    }

    /// Merge `patch` into the current draft and mark it dirty. Pure state
    /// transition, no I/O.
    pub fn update_draft(&self, patch: DraftPatch) {
        let mut state = self.write_state();
        patch.merge_into(&mut state.fields);
        state.is_dirty = true;
    }

    /// Merge `patch`, write the resulting record durably, and on success
    /// stamp `last_saved` and clear dirtiness. The only operation that
    /// cleans the draft. On a failed write the merged fields stay in memory
    /// and the draft stays dirty, so a later cycle retries naturally.
    pub async fn save_draft(&self, patch: DraftPatch) -> Result<DraftRecord> {
        let candidate = {
            let mut state = self.write_state();
            patch.merge_into(&mut state.fields);
            state.is_dirty = true;
            DraftRecord::committed(state.fields.clone(), Utc::now())
        };

        self.store.save(&self.key, &candidate).await?;

        let mut state = self.write_state();
        state.last_saved = candidate.last_saved;
        // An edit that raced the write keeps the draft dirty; the durable
        // record still reflects the commit that actually happened.
        if state.fields == candidate.fields {
            state.is_dirty = false;
        }
        debug!(key = %self.key, "draft committed");
        Ok(candidate)
    }

    /// Replace the entire in-memory draft, dirtiness included. Used when the
    /// caller applies a restored durable record.
    pub fn load_draft(&self, record: DraftRecord) {
        *self.write_state() = record;
    }

    /// Reset the draft to empty defaults and remove the durable record.
    pub async fn clear_draft(&self) -> Result<()> {
        self.store.remove(&self.key).await?;
        *self.write_state() = DraftRecord::empty();
        debug!(key = %self.key, "draft cleared");
        Ok(())
    }

    /// Read the durable record without applying it.
    pub async fn fetch_persisted(&self) -> Result<Option<DraftRecord>> {
        self.store.load(&self.key).await
    }

    pub fn current(&self) -> DraftRecord {
        self.read_state().clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.read_state().is_dirty
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.read_state().last_saved
    }

    fn read_state(&self) -> RwLockReadGuard<'_, DraftRecord> {
        self.state.read().unwrap_or_else(|err| err.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, DraftRecord> {
        self.state.write().unwrap_or_else(|err| err.into_inner())
    }
}
