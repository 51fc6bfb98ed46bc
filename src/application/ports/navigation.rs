/// Host-platform history capabilities the navigation guard relies on.
///
/// By the time a back/forward handler runs, the host has already moved in
/// history, so `push_path` is a compensating re-push rather than a true
/// cancellation.
pub trait NavigationHost: Send + Sync {
    fn current_path(&self) -> String;
    fn push_path(&self, path: &str);
}

/// Pluggable "are you sure" capability, so the warn-iff-dirty decision is
/// testable without a real browser host.
pub trait ConfirmIntent: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Mirror of the host's cancellable page-unload event. The guard records its
/// intent on the event; whether the host actually shows the message is
/// best-effort, platform-defined.
#[derive(Debug, Default)]
pub struct UnloadEvent {
    default_prevented: bool,
    return_message: Option<String>,
}

impl UnloadEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn set_return_message(&mut self, message: impl Into<String>) {
        self.return_message = Some(message.into());
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn return_message(&self) -> Option<&str> {
        self.return_message.as_deref()
    }
}

/// Outcome of a history-navigation interception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDecision {
    /// Navigation proceeds (draft clean, guard stopped, or user confirmed).
    Allowed,
    /// User declined; the current path was re-pushed onto host history.
    Reverted,
}
