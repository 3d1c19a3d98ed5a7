use async_trait::async_trait;
use tokio::sync::RwLock;

use sw_core::ports::DraftRepositoryPort;
use sw_core::wizard::WizardSnapshot;

/// Process-local draft storage for tests and hosts without a disk.
#[derive(Default)]
pub struct InMemoryDraftRepository {
    draft: RwLock<Option<WizardSnapshot>>,
}

impl InMemoryDraftRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(snapshot: WizardSnapshot) -> Self {
        Self {
            draft: RwLock::new(Some(snapshot)),
        }
    }
}

#[async_trait]
impl DraftRepositoryPort for InMemoryDraftRepository {
    async fn load_draft(&self) -> anyhow::Result<Option<WizardSnapshot>> {
        Ok(self.draft.read().await.clone())
    }

    async fn save_draft(&self, snapshot: &WizardSnapshot) -> anyhow::Result<()> {
        *self.draft.write().await = Some(snapshot.clone());
        Ok(())
    }

    async fn clear_draft(&self) -> anyhow::Result<()> {
        *self.draft.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_clears_latest_draft() {
        let repo = InMemoryDraftRepository::new();
        assert!(!repo.has_draft().await.unwrap());

        repo.save_draft(&WizardSnapshot::new("a")).await.unwrap();
        repo.save_draft(&WizardSnapshot::new("b")).await.unwrap();
        assert_eq!(
            repo.load_draft().await.unwrap(),
            Some(WizardSnapshot::new("b"))
        );

        repo.clear_draft().await.unwrap();
        assert!(repo.load_draft().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn with_draft_is_preloaded() {
        let repo = InMemoryDraftRepository::with_draft(WizardSnapshot::new("x"));
        assert!(repo.has_draft().await.unwrap());
    }
}
