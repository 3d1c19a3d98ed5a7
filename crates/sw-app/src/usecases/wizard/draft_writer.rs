//! Background draft persistence.
//!
//! The controller hands snapshots to a [`ChannelDraftSink`] and moves on.
//! A [`DraftWriter`] task drains the channel into a
//! [`DraftRepositoryPort`]. Saves and clears share one channel, so a clear
//! always lands after the snapshots queued before it. Failed writes are
//! logged and dropped; the next navigation produces a fresh snapshot anyway.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, warn, Instrument};

use sw_core::ports::{DraftRepositoryPort, DraftSinkPort};
use sw_core::wizard::WizardSnapshot;

#[derive(Debug)]
enum DraftOp {
    Save(WizardSnapshot),
    Clear,
}

/// Sending half handed to the controller.
#[derive(Clone)]
pub struct ChannelDraftSink {
    tx: mpsc::UnboundedSender<DraftOp>,
}

impl ChannelDraftSink {
    fn send(&self, op: DraftOp) {
        if self.tx.send(op).is_err() {
            warn!("draft writer has stopped; draft update dropped");
        }
    }
}

impl DraftSinkPort for ChannelDraftSink {
    fn submit(&self, snapshot: WizardSnapshot) {
        self.send(DraftOp::Save(snapshot));
    }

    fn clear(&self) {
        self.send(DraftOp::Clear);
    }
}

pub struct DraftWriter {
    repository: Arc<dyn DraftRepositoryPort>,
}

impl DraftWriter {
    pub fn new(repository: Arc<dyn DraftRepositoryPort>) -> Self {
        Self { repository }
    }

    pub fn from_ports(repository: Arc<dyn DraftRepositoryPort>) -> Self {
        Self::new(repository)
    }

    /// Spawn the writer on the current tokio runtime.
    ///
    /// The task ends once every sink clone is dropped and resolves to the
    /// number of drafts written.
    pub fn spawn(self) -> (ChannelDraftSink, JoinHandle<usize>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let span = info_span!("usecase.wizard.draft_writer");
        let handle = tokio::spawn(self.run(rx).instrument(span));
        (ChannelDraftSink { tx }, handle)
    }

    async fn run(self, mut rx: mpsc::UnboundedReceiver<DraftOp>) -> usize {
        let mut written = 0;
        while let Some(first) = rx.recv().await {
            // Fold everything queued: a clear drops the saves before it and
            // only the newest save after the last clear matters.
            let mut clear = false;
            let mut latest = None;
            let mut next = Some(first);
            while let Some(op) = next {
                match op {
                    DraftOp::Save(snapshot) => latest = Some(snapshot),
                    DraftOp::Clear => {
                        clear = true;
                        latest = None;
                    }
                }
                next = rx.try_recv().ok();
            }

            if clear {
                match self.repository.clear_draft().await {
                    Ok(()) => debug!("wizard draft cleared"),
                    Err(err) => warn!(error = %err, "failed to clear wizard draft"),
                }
            }

            if let Some(latest) = latest {
                match self.repository.save_draft(&latest).await {
                    Ok(()) => {
                        written += 1;
                        debug!(current = %latest.current_step_id, "wizard draft persisted");
                    }
                    Err(err) => {
                        warn!(error = %err, "failed to persist wizard draft");
                    }
                }
            }
        }
        written
    }
}
