use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding/pattern severity, ordered so `Severity::Low < Severity::Critical`
/// and `Pattern::bump_severity` (guidewright-store) can compare-and-assign
/// upward without a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// `severityWeight` from the confidence/priority model (§4.H).
    pub fn weight(&self) -> f64 {
        match self {
            Severity::Critical => 1.0,
            Severity::High => 0.9,
            Severity::Medium => 0.7,
            Severity::Low => 0.5,
        }
    }

    pub fn is_high_or_critical(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        };
        write!(f, "{}", label)
    }
}

/// Whether a carrier's guidance was followed for a given occurrence —
/// a real three-state value (`wasAdheredTo` in the source spec), not
/// `Option<bool>`: "we could not yet tell" is a distinct, common outcome
/// from "it was violated", and collapsing them would make noncompliance
/// detection silently wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adherence {
    Adhered,
    Violated,
    Unknown,
}
