//! Ordered, immutable step catalog.

use std::collections::HashMap;

use crate::ids::StepId;
use crate::wizard::error::ConfigurationError;
use crate::wizard::step::StepDescriptor;

#[derive(Debug, Clone)]
pub struct StepRegistry {
    steps: Vec<StepDescriptor>,
    positions: HashMap<StepId, usize>,
}

impl StepRegistry {
    pub fn new(steps: Vec<StepDescriptor>) -> Result<Self, ConfigurationError> {
        if steps.is_empty() {
            return Err(ConfigurationError::EmptyRegistry);
        }

        let mut positions = HashMap::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            if positions.insert(step.id().clone(), index).is_some() {
                return Err(ConfigurationError::DuplicateStep(step.id().clone()));
            }
        }

        Ok(Self { steps, positions })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn first(&self) -> &StepDescriptor {
        &self.steps[0]
    }

    pub fn contains(&self, id: &StepId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn position(&self, id: &StepId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn get(&self, id: &StepId) -> Option<&StepDescriptor> {
        self.position(id).and_then(|index| self.steps.get(index))
    }

    /// The step registered after `id`, if any.
    pub fn next_after(&self, id: &StepId) -> Option<&StepDescriptor> {
        self.position(id).and_then(|index| self.steps.get(index + 1))
    }

    /// The step registered before `id`, if any.
    pub fn previous_before(&self, id: &StepId) -> Option<&StepDescriptor> {
        self.position(id)
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.steps.get(index))
    }

    /// Whether `id` is the final registered step.
    pub fn is_last(&self, id: &StepId) -> bool {
        self.position(id) == Some(self.steps.len() - 1)
    }

    pub fn ids(&self) -> impl Iterator<Item = &StepId> {
        self.steps.iter().map(StepDescriptor::id)
    }
}
