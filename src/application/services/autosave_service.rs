use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::ports::{Notice, NoticePublisher};
use crate::application::services::DraftService;
use crate::domain::entities::{DraftFields, DraftPatch, DraftRecord};
use crate::shared::config::{AutosaveConfig, MIN_AUTOSAVE_INTERVAL_MS};
use crate::shared::error::Result;

pub const SAVED_NOTICE_MESSAGE: &str = "Draft saved automatically";

/// Where the draft sits in its save lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosavePhase {
    /// No uncommitted changes.
    Clean,
    /// Uncommitted changes; a commit is scheduled or awaiting the next cycle.
    DirtyPending,
    /// A durable write is in flight.
    DirtyCommitting,
}

impl AutosavePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutosavePhase::Clean => "clean",
            AutosavePhase::DirtyPending => "dirtyPending",
            AutosavePhase::DirtyCommitting => "dirtyCommitting",
        }
    }
}

struct PendingCommit {
    handle: JoinHandle<()>,
    snapshot: DraftFields,
}

struct CoordinatorInner {
    pending: Option<PendingCommit>,
    /// Serialized fields of the last snapshot that reached durable storage.
    /// Advanced only on a successful write, so failed commits retry on the
    /// next cycle.
    last_committed: Option<String>,
    /// Monotonic schedule counter. A fired timer whose generation is stale
    /// has been superseded (new edit, manual save, or cancel) and must not
    /// commit.
    generation: u64,
}

/// Watches the stream of form snapshots and decides when to persist.
///
/// Every snapshot updates in-memory state immediately; durable commits are
/// trailing-edge debounced, each new snapshot cancelling and restarting the
/// timer. When a timer fires, the snapshot is committed only if it differs
/// from the last successfully committed one.
pub struct AutosaveService {
    drafts: Arc<DraftService>,
    notices: Arc<dyn NoticePublisher>,
    enabled: AtomicBool,
    interval_ms: AtomicU64,
    notice_duration_ms: u64,
    write_in_flight: AtomicBool,
    inner: Mutex<CoordinatorInner>,
}

impl AutosaveService {
    pub fn new(
        drafts: Arc<DraftService>,
        notices: Arc<dyn NoticePublisher>,
        config: &AutosaveConfig,
    ) -> Self {
        Self {
            drafts,
            notices,
            enabled: AtomicBool::new(config.enabled),
            interval_ms: AtomicU64::new(config.interval_ms.max(MIN_AUTOSAVE_INTERVAL_MS)),
            notice_duration_ms: config.notice_duration_ms,
            write_in_flight: AtomicBool::new(false),
            inner: Mutex::new(CoordinatorInner {
                pending: None,
                last_committed: None,
                generation: 0,
            }),
        }
    }

    /// Mount-time read of the durable record. Never applies it; the caller
    /// decides whether to `adopt` the result over live edits. A corrupt
    /// record has already been discarded by the store and reads as absent.
    pub async fn restore(&self) -> Result<Option<DraftRecord>> {
        self.drafts.fetch_persisted().await
    }

    /// Apply a restored record and prime the committed-snapshot reference so
    /// an unchanged form does not trigger a redundant first write.
    pub fn adopt(&self, record: DraftRecord) -> Result<()> {
        let serialized = record.fields.serialized()?;
        self.drafts.load_draft(record);
        self.lock_inner().last_committed = Some(serialized);
        Ok(())
    }

    /// Entry point for every form change: reflect dirtiness synchronously,
    /// then restart the debounce timer.
    pub fn on_snapshot(self: &Arc<Self>, snapshot: DraftFields) {
        self.drafts.update_draft(DraftPatch::from(snapshot.clone()));
        if !self.is_enabled() {
            debug!("autosave disabled; snapshot recorded without scheduling");
            return;
        }
        self.schedule(snapshot);
    }

    /// Schedule a debounced commit of `snapshot`, cancelling any commit that
    /// was already pending.
    pub fn schedule(self: &Arc<Self>, snapshot: DraftFields) {
        let interval = Duration::from_millis(self.interval_ms.load(Ordering::Relaxed));
        let mut inner = self.lock_inner();
        inner.generation += 1;
        let generation = inner.generation;
        if let Some(previous) = inner.pending.take() {
            previous.handle.abort();
            debug!("pending autosave cancelled; timer restarted");
        }
        let service = Arc::clone(self);
        let task_snapshot = snapshot.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            service.fire(generation, task_snapshot).await;
        });
        inner.pending = Some(PendingCommit { handle, snapshot });
    }

    /// Cancel a scheduled-but-not-yet-fired commit, if any. In-flight writes
    /// are not cancelled.
    pub fn cancel_pending(&self) {
        let mut inner = self.lock_inner();
        inner.generation += 1;
        if let Some(previous) = inner.pending.take() {
            previous.handle.abort();
            debug!("pending autosave cancelled");
        }
    }

    /// Fire a pending debounced commit immediately instead of waiting out the
    /// interval. The unchanged-snapshot check still applies. Returns whether
    /// a durable write happened.
    pub async fn flush_now(&self) -> Result<bool> {
        let snapshot = {
            let mut inner = self.lock_inner();
            inner.generation += 1;
            match inner.pending.take() {
                Some(previous) => {
                    previous.handle.abort();
                    previous.snapshot
                }
                None => return Ok(false),
            }
        };
        self.commit_if_changed(snapshot).await
    }

    /// Explicit user-triggered save: cancels any pending timer and commits
    /// unconditionally, without the equality check.
    pub async fn manual_save(&self, snapshot: Option<DraftFields>) -> Result<DraftRecord> {
        self.cancel_pending();
        let fields = snapshot.unwrap_or_else(|| self.drafts.current().fields);
        let serialized = fields.serialized()?;

        self.write_in_flight.store(true, Ordering::SeqCst);
        let result = self.drafts.save_draft(DraftPatch::from(fields)).await;
        self.write_in_flight.store(false, Ordering::SeqCst);

        let record = result?;
        self.lock_inner().last_committed = Some(serialized);
        info!("draft saved manually");
        Ok(record)
    }

    /// Discard the draft entirely: cancel any pending commit, clear memory
    /// and durable storage, and forget the committed-snapshot reference.
    pub async fn discard(&self) -> Result<()> {
        self.cancel_pending();
        self.drafts.clear_draft().await?;
        self.lock_inner().last_committed = None;
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        if !enabled {
            self.cancel_pending();
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.load(Ordering::Relaxed)
    }

    /// Intervals below the floor are clamped rather than rejected.
    pub fn set_interval_ms(&self, interval_ms: u64) {
        let clamped = interval_ms.max(MIN_AUTOSAVE_INTERVAL_MS);
        if clamped != interval_ms {
            warn!(
                requested = interval_ms,
                clamped, "autosave interval below floor; clamped"
            );
        }
        self.interval_ms.store(clamped, Ordering::Relaxed);
    }

    pub fn phase(&self) -> AutosavePhase {
        if self.write_in_flight.load(Ordering::SeqCst) {
            AutosavePhase::DirtyCommitting
        } else if self.drafts.is_dirty() {
            AutosavePhase::DirtyPending
        } else {
            AutosavePhase::Clean
        }
    }

    async fn fire(self: Arc<Self>, generation: u64, snapshot: DraftFields) {
        {
            let mut inner = self.lock_inner();
            if inner.generation != generation {
                // Superseded while the timer was firing; a newer cycle owns
                // the commit now.
                return;
            }
            inner.pending = None;
        }
        if !self.is_enabled() {
            debug!("autosave disabled at fire time; skipping commit");
            return;
        }
        if let Err(err) = self.commit_if_changed(snapshot).await {
            warn!("autosave commit failed: {err}");
        }
    }

    async fn commit_if_changed(&self, snapshot: DraftFields) -> Result<bool> {
        let serialized = snapshot.serialized()?;
        let unchanged = {
            let inner = self.lock_inner();
            inner.last_committed.as_deref() == Some(serialized.as_str())
        };
        if unchanged {
            debug!("snapshot identical to last commit; skipping write");
            return Ok(false);
        }

        self.write_in_flight.store(true, Ordering::SeqCst);
        let result = self.drafts.save_draft(DraftPatch::from(snapshot)).await;
        self.write_in_flight.store(false, Ordering::SeqCst);
        result?;

        self.lock_inner().last_committed = Some(serialized);
        info!("draft autosaved");
        self.notices.publish(Notice::new(
            SAVED_NOTICE_MESSAGE,
            Duration::from_millis(self.notice_duration_ms),
        ));
        Ok(true)
    }

    fn lock_inner(&self) -> MutexGuard<'_, CoordinatorInner> {
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }
}
