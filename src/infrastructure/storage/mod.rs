pub mod memory_draft_store;
pub mod sqlite_draft_store;

pub use memory_draft_store::MemoryDraftStore;
pub use sqlite_draft_store::SqliteDraftStore;
