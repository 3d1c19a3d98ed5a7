use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of a registered wizard step.
///
/// Ordered so it can key deterministic maps in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for StepId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StepId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StepId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for StepId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StepId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StepId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_id_compares_with_str() {
        let id = StepId::from("company");
        assert_eq!(id, "company");
        assert_eq!(id.as_str(), "company");
    }

    #[test]
    fn step_id_serializes_as_plain_string() {
        let id = StepId::new("profile");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"profile\"");

        let back: StepId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
