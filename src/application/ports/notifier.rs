use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// A transient, purely informational acknowledgment shown to the user.
/// `duration` is how long the surface keeps it visible before it
/// self-dismisses; it is fixed per notice and unrelated to the autosave
/// interval.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: Uuid,
    pub message: String,
    pub duration: Duration,
    pub issued_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            duration,
            issued_at: Utc::now(),
        }
    }
}

/// Outbound notice seam. Fire-and-forget: publishing never fails and returns
/// nothing, the surface decides how (or whether) to render.
pub trait NoticePublisher: Send + Sync {
    fn publish(&self, notice: Notice);
}
