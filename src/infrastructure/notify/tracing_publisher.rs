use tracing::info;

use crate::application::ports::{Notice, NoticePublisher};

/// Default publisher when no rendering surface is wired: notices land in the
/// log stream.
#[derive(Debug, Default)]
pub struct TracingNoticePublisher;

impl NoticePublisher for TracingNoticePublisher {
    fn publish(&self, notice: Notice) {
        info!(notice_id = %notice.id, "{}", notice.message);
    }
}
