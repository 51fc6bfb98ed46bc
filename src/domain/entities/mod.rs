pub mod draft;

pub use draft::{DraftFields, DraftPatch, DraftRecord};
