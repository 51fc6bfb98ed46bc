//! End-to-end autosave scenarios, driven on a paused tokio clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use forkful_core::application::services::{AutosaveService, DraftService};
use forkful_core::domain::value_objects::DraftKey;
use forkful_core::infrastructure::notify::{ChannelNoticeHub, NoticeEvent};
use forkful_core::infrastructure::storage::MemoryDraftStore;
use forkful_core::shared::config::AutosaveConfig;

use common::mocks::CapturingNoticePublisher;
use common::{full_snapshot, named_snapshot};

struct Harness {
    store: Arc<MemoryDraftStore>,
    drafts: Arc<DraftService>,
    notices: Arc<CapturingNoticePublisher>,
    autosave: Arc<AutosaveService>,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryDraftStore::new());
    let drafts = Arc::new(DraftService::new(store.clone(), DraftKey::default()));
    let notices = Arc::new(CapturingNoticePublisher::new());
    let autosave = Arc::new(AutosaveService::new(
        drafts.clone(),
        notices.clone(),
        &AutosaveConfig {
            enabled: true,
            interval_ms: 30_000,
            notice_duration_ms: 2_000,
        },
    ));
    Harness {
        store,
        drafts,
        notices,
        autosave,
    }
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// Settle first so freshly scheduled timers register against the current
/// paused instant, then advance, then let fired commits run to completion.
async fn advance_ms(ms: u64) {
    settle().await;
    tokio::time::advance(Duration::from_millis(ms)).await;
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn basic_autosave_commits_once_at_the_interval() {
    let h = harness();

    // t = 0: one edit arrives.
    h.autosave.on_snapshot(named_snapshot("Soup"));
    assert!(h.drafts.is_dirty());
    assert_eq!(h.store.save_count(), 0);

    // Just before the interval: still nothing.
    advance_ms(29_999).await;
    assert_eq!(h.store.save_count(), 0);

    // t = 30_000: exactly one write with the edit's data.
    advance_ms(1).await;
    assert_eq!(h.store.save_count(), 1);
    assert_eq!(h.store.last_saved_record().unwrap().fields.name, "Soup");
    assert!(!h.drafts.is_dirty());
    assert!(h.drafts.last_saved().is_some());

    // No further writes without further edits.
    advance_ms(120_000).await;
    assert_eq!(h.store.save_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn edits_within_the_interval_coalesce_into_one_write() {
    let h = harness();

    h.autosave.on_snapshot(named_snapshot("S"));
    advance_ms(5_000).await;
    h.autosave.on_snapshot(named_snapshot("So"));
    advance_ms(5_000).await;
    h.autosave.on_snapshot(named_snapshot("Soup"));

    // t = 39_999 (29_999 past the last edit): nothing yet.
    advance_ms(29_999).await;
    assert_eq!(h.store.save_count(), 0);

    // t = 40_000: one write, containing only the last edit's data.
    advance_ms(1).await;
    assert_eq!(h.store.save_count(), 1);
    assert_eq!(h.store.last_saved_record().unwrap().fields.name, "Soup");
}

#[tokio::test(start_paused = true)]
async fn committing_the_same_snapshot_twice_writes_once() {
    let h = harness();

    h.autosave.on_snapshot(full_snapshot());
    advance_ms(30_000).await;
    assert_eq!(h.store.save_count(), 1);

    h.autosave.on_snapshot(full_snapshot());
    advance_ms(30_000).await;

    assert_eq!(h.store.save_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn manual_save_preempts_the_pending_automatic_commit() {
    let h = harness();

    h.autosave.on_snapshot(named_snapshot("Soup"));
    advance_ms(10_000).await;

    h.autosave.manual_save(None).await.unwrap();
    assert_eq!(h.store.save_count(), 1);
    assert!(!h.drafts.is_dirty());

    // The cancelled timer never produces a duplicate or stale write.
    advance_ms(120_000).await;
    assert_eq!(h.store.save_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn automatic_commit_publishes_a_transient_notice() {
    let h = harness();

    h.autosave.on_snapshot(named_snapshot("Soup"));
    advance_ms(30_000).await;

    assert_eq!(h.notices.count(), 1);
    let notice = h.notices.last().unwrap();
    assert_eq!(notice.message, "Draft saved automatically");
    assert_eq!(notice.duration, Duration::from_millis(2_000));
}

#[tokio::test(start_paused = true)]
async fn notice_hub_emits_shown_then_dismissed() {
    let store = Arc::new(MemoryDraftStore::new());
    let drafts = Arc::new(DraftService::new(store, DraftKey::default()));
    let (hub, mut rx) = ChannelNoticeHub::channel();
    let autosave = Arc::new(AutosaveService::new(
        drafts,
        Arc::new(hub),
        &AutosaveConfig {
            enabled: true,
            interval_ms: 30_000,
            notice_duration_ms: 2_000,
        },
    ));

    autosave.on_snapshot(named_snapshot("Soup"));
    advance_ms(30_000).await;

    let shown_id = match rx.recv().await.unwrap() {
        NoticeEvent::Shown(notice) => notice.id,
        other => panic!("expected Shown, got {other:?}"),
    };

    // The notice dismisses itself after its fixed duration, independent of
    // the autosave interval.
    advance_ms(2_000).await;
    match rx.recv().await.unwrap() {
        NoticeEvent::Dismissed(id) => assert_eq!(id, shown_id),
        other => panic!("expected Dismissed, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn discard_clears_memory_and_durable_record() {
    let h = harness();

    h.autosave.on_snapshot(named_snapshot("Soup"));
    advance_ms(30_000).await;
    assert_eq!(h.store.save_count(), 1);

    h.autosave.on_snapshot(named_snapshot("Soup II"));
    assert!(h.drafts.is_dirty());

    h.autosave.discard().await.unwrap();

    assert!(!h.drafts.is_dirty());
    assert!(h.drafts.current().fields.is_empty());
    assert!(h.drafts.fetch_persisted().await.unwrap().is_none());

    // The pending timer for "Soup II" was cancelled along with the draft.
    advance_ms(120_000).await;
    assert!(h.drafts.fetch_persisted().await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn write_failure_keeps_draft_dirty_until_a_later_cycle() {
    let h = harness();
    h.store.fail_next_save();

    h.autosave.on_snapshot(named_snapshot("Soup"));
    advance_ms(30_000).await;

    assert_eq!(h.store.save_count(), 0);
    assert!(h.drafts.is_dirty());
    assert_eq!(h.notices.count(), 0);

    // A manual save retries and succeeds; memory was the source of truth all
    // along.
    let record = h.autosave.manual_save(None).await.unwrap();
    assert_eq!(record.fields.name, "Soup");
    assert!(!h.drafts.is_dirty());
    assert_eq!(h.store.save_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn interval_change_applies_to_the_next_cycle() {
    let h = harness();
    h.autosave.set_interval_ms(5_000);

    h.autosave.on_snapshot(named_snapshot("Soup"));
    advance_ms(4_999).await;
    assert_eq!(h.store.save_count(), 0);
    advance_ms(1).await;
    assert_eq!(h.store.save_count(), 1);
}
