//! Derived progress view.

use serde::{Deserialize, Serialize};

use crate::wizard::registry::StepRegistry;
use crate::wizard::state::{CompletedSteps, WizardStatus};

/// How the progress percentage is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPolicy {
    /// Completed required steps over required steps, capped at 99% until
    /// the wizard is complete. A finished wizard reads 100% even when it
    /// skipped optional steps.
    #[default]
    RequiredSteps,
    /// Completed steps over all steps, optional ones included. Never 100%
    /// before the wizard is complete.
    AllSteps,
}

/// Read-only progress numbers. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub completed_count: usize,
    pub total_steps: usize,
    pub required_completed: usize,
    pub required_total: usize,
    /// 0..=100
    pub percentage: u8,
    pub is_complete: bool,
}

impl ProgressView {
    pub fn compute(
        registry: &StepRegistry,
        completed: &CompletedSteps,
        status: WizardStatus,
        policy: ProgressPolicy,
    ) -> Self {
        let total_steps = registry.len();
        let completed_count = registry
            .ids()
            .filter(|id| completed.contains(id))
            .count();
        let required_total = registry
            .steps()
            .iter()
            .filter(|step| !step.is_optional())
            .count();
        let required_completed = registry
            .steps()
            .iter()
            .filter(|step| !step.is_optional() && completed.contains(step.id()))
            .count();
        let is_complete = status == WizardStatus::Complete;

        let raw = match policy {
            ProgressPolicy::AllSteps => ratio(completed_count, total_steps),
            ProgressPolicy::RequiredSteps if required_total == 0 => {
                ratio(completed_count, total_steps)
            }
            ProgressPolicy::RequiredSteps => ratio(required_completed, required_total),
        };
        // 100% is reserved for a finished wizard.
        let percentage = match (is_complete, policy) {
            (true, ProgressPolicy::RequiredSteps) => 100,
            (true, ProgressPolicy::AllSteps) => raw,
            (false, _) => raw.min(99),
        };

        Self {
            completed_count,
            total_steps,
            required_completed,
            required_total,
            percentage,
            is_complete,
        }
    }
}

fn ratio(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = done.min(total) * 100 / total;
    u8::try_from(pct).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::StepId;
    use crate::wizard::step::StepDescriptor;

    fn registry() -> StepRegistry {
        StepRegistry::new(vec![
            StepDescriptor::new("a", "A"),
            StepDescriptor::new("b", "B").optional(),
            StepDescriptor::new("c", "C"),
        ])
        .unwrap()
    }

    fn completed(ids: &[&str]) -> CompletedSteps {
        ids.iter().map(|id| StepId::from(*id)).collect()
    }

    #[test]
    fn initial_progress_is_zero() {
        let view = ProgressView::compute(
            &registry(),
            &CompletedSteps::new(),
            WizardStatus::NotStarted,
            ProgressPolicy::AllSteps,
        );
        assert_eq!(view.completed_count, 0);
        assert_eq!(view.total_steps, 3);
        assert_eq!(view.percentage, 0);
        assert!(!view.is_complete);
    }

    #[test]
    fn all_steps_policy_reads_below_full_when_optional_skipped() {
        let view = ProgressView::compute(
            &registry(),
            &completed(&["a", "c"]),
            WizardStatus::Complete,
            ProgressPolicy::AllSteps,
        );
        assert_eq!(view.percentage, 66);
        assert!(view.is_complete);
    }

    #[test]
    fn required_steps_policy_reads_full_when_optional_skipped() {
        let view = ProgressView::compute(
            &registry(),
            &completed(&["a", "c"]),
            WizardStatus::Complete,
            ProgressPolicy::RequiredSteps,
        );
        assert_eq!(view.required_completed, 2);
        assert_eq!(view.required_total, 2);
        assert_eq!(view.percentage, 100);
    }

    #[test]
    fn required_steps_policy_ignores_completed_optional_steps() {
        let view = ProgressView::compute(
            &registry(),
            &completed(&["b"]),
            WizardStatus::InProgress,
            ProgressPolicy::RequiredSteps,
        );
        assert_eq!(view.completed_count, 1);
        assert_eq!(view.percentage, 0);
    }

    #[test]
    fn all_optional_registry_reports_full_once_complete() {
        let registry = StepRegistry::new(vec![
            StepDescriptor::new("x", "X").optional(),
            StepDescriptor::new("y", "Y").optional(),
        ])
        .unwrap();

        let partial = ProgressView::compute(
            &registry,
            &completed(&["x"]),
            WizardStatus::InProgress,
            ProgressPolicy::RequiredSteps,
        );
        assert_eq!(partial.percentage, 50);

        let done = ProgressView::compute(
            &registry,
            &completed(&["x"]),
            WizardStatus::Complete,
            ProgressPolicy::RequiredSteps,
        );
        assert_eq!(done.percentage, 100);
    }

    #[test]
    fn required_steps_policy_stays_below_full_until_complete() {
        let registry = StepRegistry::new(vec![
            StepDescriptor::new("a", "A"),
            StepDescriptor::new("b", "B").optional(),
        ])
        .unwrap();

        let pending = ProgressView::compute(
            &registry,
            &completed(&["a"]),
            WizardStatus::InProgress,
            ProgressPolicy::RequiredSteps,
        );
        assert_eq!(pending.required_completed, pending.required_total);
        assert_eq!(pending.percentage, 99);
        assert!(!pending.is_complete);

        let finished = ProgressView::compute(
            &registry,
            &completed(&["a"]),
            WizardStatus::Complete,
            ProgressPolicy::RequiredSteps,
        );
        assert_eq!(finished.percentage, 100);
    }

    #[test]
    fn all_steps_policy_caps_below_full_until_complete() {
        let view = ProgressView::compute(
            &registry(),
            &completed(&["a", "b", "c"]),
            WizardStatus::InProgress,
            ProgressPolicy::AllSteps,
        );
        assert_eq!(view.percentage, 99);
    }
}
