use crate::sha256_key::Sha256Key;
use guidewright_evidence::{
    CarrierQuoteType, FailureMode, PatternId, Scope, ScoutType, Severity, Stage, Tags,
};
use serde::{Deserialize, Serialize};

/// `Pattern::pattern_key = SHA-256(carrierStage || normalisedContent ||
/// findingCategory)` (§3). Unique per `(workspace, project, patternKey)`
/// among *active* patterns.
pub type PatternKey = Sha256Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternStatus {
    Active,
    Archived,
    Superseded,
}

/// Canonical record of bad guidance: a carrier fragment judged harmful,
/// deduplicated by `pattern_key` within a project. `pattern_content` is
/// immutable once created; `severity_max` and `primary_carrier_quote_type`
/// only ever move upward while the pattern has any active occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: PatternId,
    pub scope: Scope,
    pub pattern_key: PatternKey,
    pattern_content: String,
    pub carrier_stage: Stage,
    pub finding_category: ScoutType,
    pub failure_mode: FailureMode,
    severity_max: Severity,
    primary_carrier_quote_type: CarrierQuoteType,
    pub tags: Tags,
    pub status: PatternStatus,
    pub permanent: bool,
    pub created_at_ms: u64,
    pub last_active_at_ms: u64,
}

impl Pattern {
    /// `normalisedContent` is whatever lowercased/whitespace-collapsed form
    /// of the carrier excerpt the caller derives; this function only joins
    /// the three key inputs named in §3, it does not itself normalise text.
    pub fn compute_key(
        carrier_stage: Stage,
        normalised_content: &str,
        finding_category: ScoutType,
    ) -> PatternKey {
        Sha256Key::hash_joined(&[
            &carrier_stage.to_string(),
            normalised_content,
            finding_category.as_str(),
        ])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: PatternId,
        scope: Scope,
        pattern_content: impl Into<String>,
        carrier_stage: Stage,
        finding_category: ScoutType,
        failure_mode: FailureMode,
        severity: Severity,
        quote_type: CarrierQuoteType,
        tags: Tags,
        permanent: bool,
        now_ms: u64,
    ) -> Self {
        let pattern_content = pattern_content.into();
        let pattern_key = Self::compute_key(carrier_stage, &pattern_content, finding_category);
        Self {
            id,
            scope,
            pattern_key,
            pattern_content,
            carrier_stage,
            finding_category,
            failure_mode,
            severity_max: severity,
            primary_carrier_quote_type: quote_type,
            tags,
            status: PatternStatus::Active,
            permanent,
            created_at_ms: now_ms,
            last_active_at_ms: now_ms,
        }
    }

    pub fn pattern_content(&self) -> &str {
        &self.pattern_content
    }

    pub fn severity_max(&self) -> Severity {
        self.severity_max
    }

    pub fn primary_carrier_quote_type(&self) -> CarrierQuoteType {
        self.primary_carrier_quote_type
    }

    /// Compare-and-assign upward only. `severity_max` is a running maximum
    /// over occurrences that were ever active (§9 Open Question a) — there
    /// is deliberately no way to lower it, even if every high-severity
    /// occurrence is later inactivated.
    pub fn bump_severity(&mut self, observed: Severity) {
        if observed > self.severity_max {
            self.severity_max = observed;
        }
    }

    /// Upgrade only if `observed` ranks strictly above the current primary
    /// quote type (`Verbatim > Paraphrase > Inferred`).
    pub fn upgrade_quote_type(&mut self, observed: CarrierQuoteType) {
        if observed > self.primary_carrier_quote_type {
            self.primary_carrier_quote_type = observed;
        }
    }

    pub fn record_occurrence(&mut self, severity: Severity, quote_type: CarrierQuoteType, now_ms: u64) {
        self.bump_severity(severity);
        self.upgrade_quote_type(quote_type);
        self.last_active_at_ms = now_ms;
    }

    pub fn archive(&mut self) {
        self.status = PatternStatus::Archived;
    }

    pub fn supersede(&mut self) {
        self.status = PatternStatus::Superseded;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, PatternStatus::Active)
    }
}
