use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of review agent that produced a Finding. Doubles as the
/// `findingCategory` input to `patternKey` (§3) and as the filter the
/// cross-project injection stage uses (`findingCategory == security`,
/// §4.I stage 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoutType {
    Adversarial,
    Security,
    Bugs,
    Tests,
    Docs,
    Spec,
    Decisions,
}

impl ScoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoutType::Adversarial => "adversarial",
            ScoutType::Security => "security",
            ScoutType::Bugs => "bugs",
            ScoutType::Tests => "tests",
            ScoutType::Docs => "docs",
            ScoutType::Spec => "spec",
            ScoutType::Decisions => "decisions",
        }
    }

    /// `scoutType ∈ {security, adversarial}`, the gate for provisional
    /// alert eligibility (§4.G step 7).
    pub fn is_alert_eligible(&self) -> bool {
        matches!(self, ScoutType::Security | ScoutType::Adversarial)
    }
}

impl fmt::Display for ScoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
