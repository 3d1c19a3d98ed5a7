//! Wizard session use cases.
//!
//! Resuming from a stored draft, persisting drafts in the background and
//! discarding progress.

mod discard;
mod draft_writer;
mod resume;

pub use discard::DiscardDraft;
pub use draft_writer::{ChannelDraftSink, DraftWriter};
pub use resume::{ResumeWizard, ResumeWizardError};
