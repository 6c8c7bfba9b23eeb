use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of why guidance failed, as produced by the
/// Failure-Mode Resolver's seven-rule decision tree (§4.E).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureMode {
    /// A mandatory doc was missing and no citation was given (rule 1).
    MissingReference,
    /// A cited, retrievable source disagrees with the carrier (rule 2).
    SynthesisDrift,
    /// The evidence carries unresolved conflict signals (rule 3).
    ConflictUnresolved,
    /// Vague guidance with no testable acceptance criteria (rule 4).
    Ambiguous,
    /// The carrier explicitly instructed the harmful behaviour (rule 5).
    Incorrect,
    /// The carrier was benign but missing guardrails, or no rule matched
    /// (rule 6 and the default case, rule 7).
    Incomplete,
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureMode::MissingReference => "missing_reference",
            FailureMode::SynthesisDrift => "synthesis_drift",
            FailureMode::ConflictUnresolved => "conflict_unresolved",
            FailureMode::Ambiguous => "ambiguous",
            FailureMode::Incorrect => "incorrect",
            FailureMode::Incomplete => "incomplete",
        };
        write!(f, "{}", label)
    }
}
