//! Wizard domain module.
//!
//! Step registry, validation gates, the controller state machine and the
//! draft snapshot format.

pub mod content;
pub mod controller;
pub mod error;
pub mod progress;
pub mod registry;
pub mod snapshot;
pub mod state;
pub mod step;
pub mod validation;

pub use content::{StepContent, StepContext, StepView};
pub use controller::{Advance, WizardController};
pub use error::{ConfigurationError, Rejection, WizardError};
pub use progress::{ProgressPolicy, ProgressView};
pub use registry::StepRegistry;
pub use snapshot::WizardSnapshot;
pub use state::{CompletedSteps, WizardState, WizardStatus};
pub use step::StepDescriptor;
pub use validation::{validators, ValidationResult, Validator};
