pub mod channel_hub;
pub mod tracing_publisher;

pub use channel_hub::{ChannelNoticeHub, NoticeEvent};
pub use tracing_publisher::TracingNoticePublisher;
