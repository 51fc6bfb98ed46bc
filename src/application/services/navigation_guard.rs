use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::application::ports::navigation::NavDecision;
use crate::application::ports::{ConfirmIntent, NavigationHost, UnloadEvent};
use crate::application::services::DraftService;

pub const UNLOAD_WARNING: &str = "You have unsaved changes. Are you sure you want to leave?";
pub const NAVIGATE_WARNING: &str =
    "You have unsaved changes. Are you sure you want to leave? Your draft will be saved automatically.";

/// Warns about unsaved edits on page-unload and history navigation.
///
/// Renders nothing and owns no draft state; it only reads the dirty flag.
/// Handlers are inert until `start()` and again after `stop()`, which models
/// listener registration and guaranteed removal on teardown.
pub struct NavigationGuard {
    drafts: Arc<DraftService>,
    host: Arc<dyn NavigationHost>,
    confirm: Arc<dyn ConfirmIntent>,
    started: AtomicBool,
}

impl NavigationGuard {
    pub fn new(
        drafts: Arc<DraftService>,
        host: Arc<dyn NavigationHost>,
        confirm: Arc<dyn ConfirmIntent>,
    ) -> Self {
        Self {
            drafts,
            host,
            confirm,
            started: AtomicBool::new(false),
        }
    }

    pub fn start(&self) {
        if !self.started.swap(true, Ordering::SeqCst) {
            debug!("navigation guard started");
        }
    }

    pub fn stop(&self) {
        if self.started.swap(false, Ordering::SeqCst) {
            debug!("navigation guard stopped");
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Page-unload signal. Best-effort: the guard records its intent on the
    /// event; whether the host shows the message is platform-defined.
    pub fn handle_unload(&self, event: &mut UnloadEvent) {
        if !self.is_started() || !self.drafts.is_dirty() {
            return;
        }
        event.prevent_default();
        event.set_return_message(UNLOAD_WARNING);
    }

    /// Back/forward navigation signal. The host has already moved in history
    /// when this runs; declining re-pushes the current path as a
    /// compensating action.
    pub fn handle_pop_state(&self) -> NavDecision {
        if !self.is_started() || !self.drafts.is_dirty() {
            return NavDecision::Allowed;
        }
        if self.confirm.confirm(NAVIGATE_WARNING) {
            return NavDecision::Allowed;
        }
        let path = self.host.current_path();
        self.host.push_path(&path);
        debug!(%path, "navigation declined; path re-pushed");
        NavDecision::Reverted
    }
}

impl Drop for NavigationGuard {
    fn drop(&mut self) {
        self.stop();
    }
}
