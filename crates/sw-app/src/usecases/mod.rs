//! Business logic use cases

pub mod wizard;

pub use wizard::{ChannelDraftSink, DiscardDraft, DraftWriter, ResumeWizard, ResumeWizardError};
