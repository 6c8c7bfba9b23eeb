use crate::scope::FindingId;
use crate::scout_type::ScoutType;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FindingValidationError {
    #[error("prNumber must be >= 1, got {0}")]
    InvalidPrNumber(i64),
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("location.file must not be empty")]
    EmptyLocationFile,
}

/// `{file, line?}` — the code location a Finding points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: Option<u32>,
}

/// A single reviewer-reported defect on a pull request, in the exact shape
/// the external Finding input schema (§6) specifies. The only boundary
/// validator for this type is `Finding::new` — once constructed, a
/// `Finding` is known to satisfy the schema everywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub id: FindingId,
    pub issue_id: String,
    pub pr_number: u32,
    pub title: String,
    pub description: String,
    pub scout_type: ScoutType,
    pub severity: Severity,
    pub evidence: String,
    pub location: Location,
}

impl Finding {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: FindingId,
        issue_id: impl Into<String>,
        pr_number: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        scout_type: ScoutType,
        severity: Severity,
        evidence: impl Into<String>,
        location: Location,
    ) -> Result<Self, FindingValidationError> {
        if pr_number < 1 {
            return Err(FindingValidationError::InvalidPrNumber(pr_number));
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(FindingValidationError::EmptyTitle);
        }
        if location.file.trim().is_empty() {
            return Err(FindingValidationError::EmptyLocationFile);
        }
        Ok(Self {
            id,
            issue_id: issue_id.into(),
            pr_number: pr_number as u32,
            title,
            description: description.into(),
            scout_type,
            severity,
            evidence: evidence.into(),
            location,
        })
    }
}
