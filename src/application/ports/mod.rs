pub mod draft_store;
pub mod navigation;
pub mod notifier;

pub use draft_store::DraftStore;
pub use navigation::{ConfirmIntent, NavDecision, NavigationHost, UnloadEvent};
pub use notifier::{Notice, NoticePublisher};
