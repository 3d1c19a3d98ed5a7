//! Infrastructure adapters for Stepwise.

pub mod draft;
pub mod time;

pub use draft::{FileDraftRepository, InMemoryDraftRepository, DEFAULT_DRAFT_FILE};
pub use time::system_clock::SystemClock;
