//! Draft snapshots exchanged with the persistence port.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::StepId;

/// Serialized wizard progress.
///
/// Field names follow the draft wire format (`currentStepId`,
/// `completedStepIds`, `wizardData`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub current_step_id: StepId,
    #[serde(default)]
    pub completed_step_ids: Vec<StepId>,
    #[serde(default)]
    pub wizard_data: BTreeMap<StepId, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at_ms: Option<i64>,
}

impl WizardSnapshot {
    pub fn new(current_step_id: impl Into<StepId>) -> Self {
        Self {
            current_step_id: current_step_id.into(),
            completed_step_ids: Vec::new(),
            wizard_data: BTreeMap::new(),
            saved_at_ms: None,
        }
    }

    pub fn with_completed<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StepId>,
    {
        self.completed_step_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_data(mut self, id: impl Into<StepId>, data: Value) -> Self {
        self.wizard_data.insert(id.into(), data);
        self
    }

    /// True when the snapshot records no progress at all.
    pub fn is_pristine(&self) -> bool {
        self.completed_step_ids.is_empty() && self.wizard_data.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
