//! Wizard state owned by the controller.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::StepId;
use crate::wizard::validation::ValidationResult;

/// Whole-wizard lifecycle.
///
/// `Complete` is terminal until the wizard is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

/// Insertion-ordered set of completed step ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletedSteps(Vec<StepId>);

impl CompletedSteps {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns false when `id` was already present.
    pub fn insert(&mut self, id: StepId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn contains(&self, id: &StepId) -> bool {
        self.0.iter().any(|done| done == id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[StepId] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<StepId> {
        self.0.clone()
    }
}

impl FromIterator<StepId> for CompletedSteps {
    fn from_iter<T: IntoIterator<Item = StepId>>(iter: T) -> Self {
        let mut set = CompletedSteps::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CompletedSteps {
    type Item = &'a StepId;
    type IntoIter = std::slice::Iter<'a, StepId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub current_step_id: StepId,
    pub completed_step_ids: CompletedSteps,
    pub step_data: BTreeMap<StepId, Value>,
    /// Latest validation per step; absent means nothing has been checked yet.
    pub validation: HashMap<StepId, ValidationResult>,
    pub status: WizardStatus,
    pub last_snapshot_at_ms: Option<i64>,
}

impl WizardState {
    pub fn fresh(first_step: StepId) -> Self {
        Self {
            current_step_id: first_step,
            completed_step_ids: CompletedSteps::new(),
            step_data: BTreeMap::new(),
            validation: HashMap::new(),
            status: WizardStatus::NotStarted,
            last_snapshot_at_ms: None,
        }
    }

    /// `NotStarted -> InProgress`; other statuses are left alone.
    pub fn mark_started(&mut self) {
        if self.status == WizardStatus::NotStarted {
            self.status = WizardStatus::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_steps_insert_is_idempotent() {
        let mut set = CompletedSteps::new();
        assert!(set.insert(StepId::from("a")));
        assert!(!set.insert(StepId::from("a")));
        assert!(set.insert(StepId::from("c")));

        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), &[StepId::from("a"), StepId::from("c")]);
    }

    #[test]
    fn completed_steps_keep_insertion_order_when_collected() {
        let set: CompletedSteps = ["c", "a", "c"].into_iter().map(StepId::from).collect();
        assert_eq!(set.to_vec(), vec![StepId::from("c"), StepId::from("a")]);
    }

    #[test]
    fn mark_started_only_leaves_not_started() {
        let mut state = WizardState::fresh(StepId::from("a"));
        state.mark_started();
        assert_eq!(state.status, WizardStatus::InProgress);

        state.status = WizardStatus::Complete;
        state.mark_started();
        assert_eq!(state.status, WizardStatus::Complete);
    }
}
