use crate::domain::entities::DraftRecord;
use crate::domain::value_objects::DraftKey;
use crate::shared::error::Result;
use async_trait::async_trait;

/// Durable single-key draft storage. One key holds at most one serialized
/// record; writes replace wholesale, absence means "no draft".
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Load the record stored under `key`. An unparseable record must be
    /// discarded (key removed) and reported as absent.
    async fn load(&self, key: &DraftKey) -> Result<Option<DraftRecord>>;

    /// Replace whatever is stored under `key` with `record`.
    async fn save(&self, key: &DraftKey, record: &DraftRecord) -> Result<()>;

    /// Remove the record under `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &DraftKey) -> Result<()>;
}
