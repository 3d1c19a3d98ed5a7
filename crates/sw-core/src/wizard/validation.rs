//! Validation gates.
//!
//! A gate is a pure, step-local function from submitted data to a
//! [`ValidationResult`]. Gates never see other steps' data.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of running a step's validation gate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_valid: false,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// Valid when `errors` is empty.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Shared, thread-safe validation gate.
pub type Validator = Arc<dyn Fn(&Value) -> ValidationResult + Send + Sync>;

/// Run an optional gate; a missing gate always accepts.
pub fn run_gate(validator: Option<&Validator>, data: &Value) -> ValidationResult {
    match validator {
        Some(gate) => gate(data),
        None => ValidationResult::valid(),
    }
}

/// Reusable gates for common step rules.
pub mod validators {
    use super::*;

    /// Reject data whose listed fields are missing, null or blank strings.
    ///
    /// Errors read `"<field> required"`, in field order.
    pub fn required_fields<I, S>(fields: I) -> Validator
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        Arc::new(move |data: &Value| {
            let errors = fields
                .iter()
                .filter(|field| is_blank(data.get(field.as_str())))
                .map(|field| format!("{field} required"))
                .collect();
            ValidationResult::from_errors(errors)
        })
    }

    /// Combine gates; errors are concatenated in gate order.
    pub fn all(gates: Vec<Validator>) -> Validator {
        Arc::new(move |data: &Value| {
            let errors = gates
                .iter()
                .flat_map(|gate| gate(data).errors)
                .collect();
            ValidationResult::from_errors(errors)
        })
    }

    fn is_blank(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }
}
