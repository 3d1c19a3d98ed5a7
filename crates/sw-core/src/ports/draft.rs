//! Draft persistence ports
//!
//! The controller emits snapshots through [`DraftSinkPort`] without waiting
//! on storage. Durable storage sits behind [`DraftRepositoryPort`]; the
//! infrastructure layer provides file-based and in-memory implementations.

use async_trait::async_trait;

use crate::wizard::WizardSnapshot;

/// Fire-and-forget receiver of snapshots.
///
/// Implementations must not block and must not report failures back to the
/// caller; retries, if any, are theirs to make.
pub trait DraftSinkPort: Send + Sync {
    fn submit(&self, snapshot: WizardSnapshot);

    /// Drop the stored draft. Ordered after every snapshot submitted before
    /// the call, so a pending write cannot bring the draft back.
    fn clear(&self);
}

#[async_trait]
pub trait DraftRepositoryPort: Send + Sync {
    /// Load the stored draft, `None` when nothing was saved.
    async fn load_draft(&self) -> anyhow::Result<Option<WizardSnapshot>>;

    /// Overwrite the stored draft.
    async fn save_draft(&self, snapshot: &WizardSnapshot) -> anyhow::Result<()>;

    /// Remove the stored draft (reset or discard).
    async fn clear_draft(&self) -> anyhow::Result<()>;

    async fn has_draft(&self) -> anyhow::Result<bool> {
        Ok(self.load_draft().await?.is_some())
    }
}

#[cfg(test)]
mockall::mock! {
    pub DraftSink {}

    impl DraftSinkPort for DraftSink {
        fn submit(&self, snapshot: WizardSnapshot);
        fn clear(&self);
    }
}
