use tokio::sync::mpsc;
use uuid::Uuid;

use crate::application::ports::{Notice, NoticePublisher};

/// Lifecycle events a rendering surface consumes. A `Shown` notice is
/// followed by a `Dismissed` event after the notice's own duration, so the
/// surface never needs its own timer.
#[derive(Debug, Clone)]
pub enum NoticeEvent {
    Shown(Notice),
    Dismissed(Uuid),
}

/// Channel-backed notice publisher for embedders that render notices
/// themselves (a webview bridge, a TUI, a test harness).
pub struct ChannelNoticeHub {
    tx: mpsc::UnboundedSender<NoticeEvent>,
}

impl ChannelNoticeHub {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NoticeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NoticePublisher for ChannelNoticeHub {
    fn publish(&self, notice: Notice) {
        let id = notice.id;
        let duration = notice.duration;
        // A closed receiver just means nobody is rendering notices anymore.
        if self.tx.send(NoticeEvent::Shown(notice)).is_err() {
            return;
        }
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = tx.send(NoticeEvent::Dismissed(id));
        });
    }
}
