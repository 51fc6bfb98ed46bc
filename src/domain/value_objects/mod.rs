pub mod draft_key;

pub use draft_key::DraftKey;
