//! # Wizard configuration DTO
//!
//! Plain data mapped from TOML. Loading the file is the host's job; this
//! module only maps values and builds step descriptors from `[[steps]]`.
//!
//! ```toml
//! [wizard]
//! progress_policy = "required_steps"
//! autosave = true
//! initial_step = "company"
//!
//! [storage]
//! draft_path = "/var/lib/stepwise/.wizard_draft"
//! log_dir = "/var/log/stepwise"
//!
//! [[steps]]
//! id = "company"
//! title = "Company"
//! required_fields = ["name"]
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::ids::StepId;
use crate::wizard::{validators, ProgressPolicy, StepDescriptor};

pub const DEFAULT_DRAFT_FILE: &str = ".wizard_draft";

/// Declarative step entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub can_skip: bool,
    /// Fields that must be present and non-blank for the step to validate.
    #[serde(default)]
    pub required_fields: Vec<String>,
}

impl StepConfig {
    pub fn to_descriptor(&self) -> StepDescriptor {
        let mut step = StepDescriptor::new(self.id.as_str(), self.title.as_str())
            .with_description(self.description.as_str());
        if self.optional {
            step = step.optional();
        }
        if self.can_skip {
            step = step.skippable();
        }
        if !self.required_fields.is_empty() {
            step = step.with_validator(validators::required_fields(self.required_fields.clone()));
        }
        step
    }
}

#[derive(Debug, Clone)]
pub struct WizardConfig {
    pub progress_policy: ProgressPolicy,
    /// Emit a draft on every navigation.
    pub autosave: bool,
    pub initial_step: Option<StepId>,
    /// Draft file path (may be empty; the host picks a default then).
    pub draft_path: PathBuf,
    /// Log directory (may be empty; file logging is disabled then).
    pub log_dir: PathBuf,
    pub steps: Vec<StepConfig>,
}

impl WizardConfig {
    /// Map a parsed TOML document.
    ///
    /// Missing values map to empty/default values. Only values that cannot
    /// be represented (unknown policy names, malformed step tables) fail.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let wizard = toml_value.get("wizard");
        let storage = toml_value.get("storage");

        let progress_policy = match wizard
            .and_then(|w| w.get("progress_policy"))
            .and_then(|v| v.as_str())
        {
            None | Some("required_steps") => ProgressPolicy::RequiredSteps,
            Some("all_steps") => ProgressPolicy::AllSteps,
            Some(other) => return Err(anyhow!("Unknown progress policy: {other}")),
        };

        let steps = match toml_value.get("steps") {
            Some(raw) => raw
                .clone()
                .try_into::<Vec<StepConfig>>()
                .context("Failed to parse [[steps]] tables")?,
            None => Vec::new(),
        };

        Ok(Self {
            progress_policy,
            autosave: wizard
                .and_then(|w| w.get("autosave"))
                .and_then(|v| v.as_bool())
                .unwrap_or(true),
            initial_step: wizard
                .and_then(|w| w.get("initial_step"))
                .and_then(|v| v.as_str())
                .map(StepId::from),
            draft_path: PathBuf::from(
                storage
                    .and_then(|s| s.get("draft_path"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            log_dir: PathBuf::from(
                storage
                    .and_then(|s| s.get("log_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            steps,
        })
    }

    pub fn empty() -> Self {
        Self {
            progress_policy: ProgressPolicy::default(),
            autosave: true,
            initial_step: None,
            draft_path: PathBuf::new(),
            log_dir: PathBuf::new(),
            steps: Vec::new(),
        }
    }

    /// Fill empty storage paths from a base data directory.
    pub fn with_system_defaults(mut self, data_dir: PathBuf) -> Self {
        if self.draft_path.as_os_str().is_empty() {
            self.draft_path = data_dir.join(DEFAULT_DRAFT_FILE);
        }
        if self.log_dir.as_os_str().is_empty() {
            self.log_dir = data_dir.join("logs");
        }
        self
    }

    pub fn descriptors(&self) -> Vec<StepDescriptor> {
        self.steps.iter().map(StepConfig::to_descriptor).collect()
    }
}
