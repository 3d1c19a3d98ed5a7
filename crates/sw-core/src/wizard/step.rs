//! Step descriptors.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::ids::StepId;
use crate::wizard::content::StepContent;
use crate::wizard::validation::{run_gate, ValidationResult, Validator};

/// Immutable description of one wizard step.
#[derive(Clone)]
pub struct StepDescriptor {
    id: StepId,
    title: String,
    description: String,
    is_optional: bool,
    can_skip: bool,
    validator: Option<Validator>,
    content: Option<Arc<dyn StepContent>>,
}

impl StepDescriptor {
    pub fn new(id: impl Into<StepId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            is_optional: false,
            can_skip: false,
            validator: None,
            content: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Optional steps complete even with invalid data and may be skipped.
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn skippable(mut self) -> Self {
        self.can_skip = true;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_validator_fn<F>(self, validator: F) -> Self
    where
        F: Fn(&Value) -> ValidationResult + Send + Sync + 'static,
    {
        self.with_validator(Arc::new(validator))
    }

    pub fn with_content(mut self, content: Arc<dyn StepContent>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn id(&self) -> &StepId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    pub fn can_skip(&self) -> bool {
        self.can_skip
    }

    pub fn is_skippable(&self) -> bool {
        self.can_skip || self.is_optional
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    pub fn content(&self) -> Option<&Arc<dyn StepContent>> {
        self.content.as_ref()
    }

    pub fn validate(&self, data: &Value) -> ValidationResult {
        run_gate(self.validator.as_ref(), data)
    }
}

impl fmt::Debug for StepDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("is_optional", &self.is_optional)
            .field("can_skip", &self.can_skip)
            .field("has_validator", &self.validator.is_some())
            .field("has_content", &self.content.is_some())
            .finish()
    }
}
