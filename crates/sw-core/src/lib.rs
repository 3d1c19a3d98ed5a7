//! # sw-core
//!
//! Core domain models and the wizard state machine for Stepwise.
//!
//! This crate contains pure logic without any infrastructure dependencies.

pub mod config;
pub mod ids;
pub mod ports;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use config::{StepConfig, WizardConfig};
pub use ids::StepId;
pub use wizard::{
    Advance, Rejection, StepDescriptor, ValidationResult, WizardController, WizardError,
    WizardSnapshot, WizardStatus,
};
