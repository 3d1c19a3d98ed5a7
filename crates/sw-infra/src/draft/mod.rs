//! Draft storage adapters.

mod file_repo;
mod memory;

pub use file_repo::FileDraftRepository;
pub use memory::InMemoryDraftRepository;
pub use sw_core::config::DEFAULT_DRAFT_FILE;
