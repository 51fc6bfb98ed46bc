pub mod autosave_service;
pub mod draft_service;
pub mod navigation_guard;

pub use autosave_service::{AutosavePhase, AutosaveService};
pub use draft_service::DraftService;
pub use navigation_guard::NavigationGuard;
