//! # Dependency wiring
//!
//! The only place that knows about sw-core, sw-app and sw-infra at once.
//! Builds adapters, hands them to the use cases as ports and returns the
//! assembled session. No wizard decisions are made here.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use sw_app::usecases::{DiscardDraft, DraftWriter, ResumeWizard};
use sw_core::config::WizardConfig;
use sw_core::ports::DraftRepositoryPort;
use sw_core::wizard::WizardController;
use sw_infra::{FileDraftRepository, SystemClock};

/// A running wizard with its persistence attached.
pub struct WizardSession {
    pub controller: WizardController,
    pub discard: DiscardDraft,
    /// Draft writer task; finishes once the controller (and its sink) is
    /// dropped, yielding the number of drafts written.
    pub writer: JoinHandle<usize>,
}

pub fn build_repository(config: &WizardConfig) -> Arc<dyn DraftRepositoryPort> {
    Arc::new(FileDraftRepository::new(config.draft_path.clone()))
}

/// Resume the wizard from the configured draft file and wire autosave.
///
/// Must be called inside a tokio runtime; the draft writer is spawned onto it.
pub async fn build_session(config: &WizardConfig) -> anyhow::Result<WizardSession> {
    build_session_with(config, build_repository(config)).await
}

pub async fn build_session_with(
    config: &WizardConfig,
    repository: Arc<dyn DraftRepositoryPort>,
) -> anyhow::Result<WizardSession> {
    let controller = ResumeWizard::from_ports(repository.clone())
        .discard_stale(true)
        .execute(config.descriptors(), config.initial_step.clone())
        .await?;

    let (sink, writer) = DraftWriter::from_ports(repository.clone()).spawn();
    let controller = controller
        .with_draft_sink(Arc::new(sink))
        .with_clock(Arc::new(SystemClock))
        .with_progress_policy(config.progress_policy)
        .with_autosave(config.autosave);

    info!(
        steps = controller.steps().len(),
        draft = %config.draft_path.display(),
        "wizard session ready"
    );

    Ok(WizardSession {
        controller,
        discard: DiscardDraft::from_ports(repository),
        writer,
    })
}
