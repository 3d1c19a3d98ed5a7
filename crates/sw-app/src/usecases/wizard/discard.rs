use std::sync::Arc;

use tracing::info;

use sw_core::ports::DraftRepositoryPort;
use sw_core::wizard::WizardController;

/// Use case for throwing away all wizard progress.
///
/// Resets the controller, which queues a clear behind any pending autosave,
/// and removes the stored draft right away.
pub struct DiscardDraft {
    repository: Arc<dyn DraftRepositoryPort>,
}

impl DiscardDraft {
    pub fn new(repository: Arc<dyn DraftRepositoryPort>) -> Self {
        Self { repository }
    }

    pub fn from_ports(repository: Arc<dyn DraftRepositoryPort>) -> Self {
        Self::new(repository)
    }

    pub async fn execute(&self, controller: &mut WizardController) -> anyhow::Result<()> {
        controller.reset();
        self.repository.clear_draft().await?;
        info!("wizard draft discarded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use serde_json::json;
    use sw_core::ids::StepId;
    use sw_core::wizard::{StepDescriptor, WizardSnapshot};

    struct MockDraftRepository {
        draft: Mutex<Option<WizardSnapshot>>,
    }

    #[async_trait::async_trait]
    impl DraftRepositoryPort for MockDraftRepository {
        async fn load_draft(&self) -> anyhow::Result<Option<WizardSnapshot>> {
            Ok(self.draft.lock().unwrap().clone())
        }

        async fn save_draft(&self, snapshot: &WizardSnapshot) -> anyhow::Result<()> {
            *self.draft.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }

        async fn clear_draft(&self) -> anyhow::Result<()> {
            *self.draft.lock().unwrap() = None;
            Ok(())
        }
    }

    #[tokio::test]
    async fn execute_resets_controller_and_clears_draft() {
        let repo = Arc::new(MockDraftRepository {
            draft: Mutex::new(Some(WizardSnapshot::new("b"))),
        });
        let mut controller = WizardController::initialize(
            vec![StepDescriptor::new("a", "A"), StepDescriptor::new("b", "B")],
            None,
            None,
        )
        .unwrap();
        controller
            .complete_step(&StepId::from("a"), json!({}))
            .unwrap();

        DiscardDraft::new(repo.clone())
            .execute(&mut controller)
            .await
            .unwrap();

        assert_eq!(controller.current_step_id(), "a");
        assert!(controller.completed_step_ids().is_empty());
        assert!(!repo.has_draft().await.unwrap());
    }
}
