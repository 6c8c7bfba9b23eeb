use crate::sha256_key::Sha256Key;
use guidewright_evidence::{
    AlertId, DocUpdateRequestId, FailureMode, FindingId, InjectionLogId, InjectionTarget,
    NoncomplianceId, PatternId, PrincipleId, SalienceIssueId, ScoutType, Severity, Stage,
};
use guidewright_resolver::{DecisionClass, PossibleCause};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Execution-side failure: the carrier held clear, testable guidance but the
/// implementation violated it anyway. Created by the Noncompliance Checker
/// (§4.F); never produces a Pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionNoncompliance {
    pub id: NoncomplianceId,
    pub finding_id: FindingId,
    pub possible_causes: Vec<PossibleCause>,
    pub detail: String,
    pub created_at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocUpdateStatus {
    Pending,
    Applied,
    Rejected,
}

/// Request to revise a carrier document, always created for `scoutType ==
/// decisions` findings (§4.G step 6), classified into a `DecisionClass` by
/// weighted-regex scoring over the finding text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocUpdateRequest {
    pub id: DocUpdateRequestId,
    pub finding_id: FindingId,
    pub decision_class: Option<DecisionClass>,
    pub carrier_stage: Stage,
    pub proposed_change: String,
    pub status: DocUpdateStatus,
    pub created_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggingMiss {
    pub id: TaggingMissId,
    pub finding_id: FindingId,
    pub expected_tag: String,
    pub created_at_ms: u64,
}

// Re-exported from guidewright-evidence's scope module via the same name,
// kept local to avoid an unused-import warning when TaggingMiss is the only
// consumer in this file.
pub use guidewright_evidence::TaggingMissId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionLog {
    pub id: InjectionLogId,
    pub pattern_id: Option<PatternId>,
    pub principle_id: Option<PrincipleId>,
    pub carrier_stage: Stage,
    pub injected_at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertStatus {
    Active,
    Expired,
    Promoted,
}

/// `{findingId, issueId}` — one occurrence contributing toward an alert's
/// promotion gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertOccurrenceRef {
    pub finding_id: FindingId,
    pub issue_id: String,
}

/// Short-lived warning for high-severity inferred evidence below the
/// Pattern gate (§4.G step 7). Expires after 14 days unless it reaches the
/// promotion gate first — either synchronously, when a new occurrence
/// brings it past the gate, or at expiry (§4.K).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionalAlert {
    pub id: AlertId,
    pub finding_id: FindingId,
    pub inject_into: InjectionTarget,
    pub occurrences: Vec<AlertOccurrenceRef>,
    pub status: AlertStatus,
    pub promoted_to_pattern_id: Option<PatternId>,
    /// Carried from the triggering finding so the injection selector can
    /// test touch overlap against a TaskProfile (§4.I stage 8) without
    /// resolving the underlying finding.
    pub tags: guidewright_evidence::Tags,
    /// The carrier fragment and classification the alert would hand to
    /// `Pattern::new` if it reaches the promotion gate (§4.K). An alert is
    /// only ever created for `carrierQuoteType == inferred` evidence, so
    /// that quote type is implicit rather than stored here.
    pub carrier_stage: Stage,
    pub finding_category: ScoutType,
    pub failure_mode: FailureMode,
    pub severity_max: Severity,
    pub pattern_content: String,
    pub created_at_ms: u64,
    pub expires_at_ms: u64,
}

pub const ALERT_EXPIRY_MS: u64 = 14 * 24 * 60 * 60 * 1000;
const PROMOTION_GATE_MIN_OCCURRENCES: usize = 2;
const PROMOTION_GATE_MIN_UNIQUE_ISSUES: usize = 2;

impl ProvisionalAlert {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AlertId,
        finding_id: FindingId,
        issue_id: impl Into<String>,
        inject_into: InjectionTarget,
        tags: guidewright_evidence::Tags,
        carrier_stage: Stage,
        finding_category: ScoutType,
        failure_mode: FailureMode,
        severity_max: Severity,
        pattern_content: impl Into<String>,
        now_ms: u64,
    ) -> Self {
        Self {
            id,
            finding_id,
            inject_into,
            occurrences: vec![AlertOccurrenceRef {
                finding_id,
                issue_id: issue_id.into(),
            }],
            status: AlertStatus::Active,
            promoted_to_pattern_id: None,
            tags,
            carrier_stage,
            finding_category,
            failure_mode,
            severity_max,
            pattern_content: pattern_content.into(),
            created_at_ms: now_ms,
            expires_at_ms: now_ms + ALERT_EXPIRY_MS,
        }
    }

    pub fn add_occurrence(&mut self, finding_id: FindingId, issue_id: impl Into<String>) {
        self.occurrences.push(AlertOccurrenceRef {
            finding_id,
            issue_id: issue_id.into(),
        });
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    pub fn unique_issue_count(&self) -> usize {
        self.occurrences
            .iter()
            .map(|o| o.issue_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// `>=2` active occurrences across `>=2` unique issues (§4.G step 7,
    /// §4.K). Checked both synchronously on each new occurrence and at
    /// expiry.
    pub fn meets_promotion_gate(&self) -> bool {
        self.occurrences.len() >= PROMOTION_GATE_MIN_OCCURRENCES
            && self.unique_issue_count() >= PROMOTION_GATE_MIN_UNIQUE_ISSUES
    }

    pub fn promote(&mut self, pattern_id: PatternId) {
        self.status = AlertStatus::Promoted;
        self.promoted_to_pattern_id = Some(pattern_id);
    }

    pub fn expire(&mut self) {
        self.status = AlertStatus::Expired;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalienceStatus {
    Pending,
    Resolved,
}

/// Tracker for a guidance location that keeps being ignored, keyed by
/// `locationHash = SHA-256(stage || location || excerpt)` — an upsert
/// target, not an append-only log: repeated ignores of the same location
/// increment `occurrence_count` on the same row rather than creating a new
/// one. Resolved issues are never reopened (§4.K).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalienceIssue {
    pub id: SalienceIssueId,
    pub location_hash: Sha256Key,
    pub carrier_stage: Stage,
    pub location: String,
    pub occurrence_count: u32,
    pub status: SalienceStatus,
    pub first_detected_at_ms: u64,
    pub last_detected_at_ms: u64,
}

impl SalienceIssue {
    pub fn compute_location_hash(stage: Stage, location: &str, excerpt: &str) -> Sha256Key {
        Sha256Key::hash_joined(&[&stage.to_string(), location, excerpt])
    }

    pub fn new(
        id: SalienceIssueId,
        stage: Stage,
        location: impl Into<String>,
        excerpt: &str,
        now_ms: u64,
    ) -> Self {
        let location = location.into();
        let location_hash = Self::compute_location_hash(stage, &location, excerpt);
        Self {
            id,
            location_hash,
            carrier_stage: stage,
            location,
            occurrence_count: 1,
            status: SalienceStatus::Pending,
            first_detected_at_ms: now_ms,
            last_detected_at_ms: now_ms,
        }
    }

    /// Apply an upsert-ignore to this row: bump the count and the
    /// last-seen timestamp. No-op on a resolved issue — resolved issues
    /// are never reopened.
    pub fn record_ignore(&mut self, now_ms: u64) {
        if self.status == SalienceStatus::Resolved {
            return;
        }
        self.occurrence_count += 1;
        self.last_detected_at_ms = now_ms;
    }

    pub fn resolve(&mut self) {
        self.status = SalienceStatus::Resolved;
    }
}

/// What the orchestrator did with a single Finding, recorded once per
/// attribution call and consumed by the kill-switch's rolling metrics
/// (§4.G step 10, §4.J).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionOutcome {
    pub id: guidewright_evidence::OutcomeId,
    pub finding_id: FindingId,
    pub carrier_quote_type: guidewright_evidence::CarrierQuoteType,
    pub pattern_created: bool,
    pub injection_outcome: Option<bool>,
    pub reasoning: String,
    pub created_at_ms: u64,
}

impl AttributionOutcome {
    pub fn resolve_injection_outcome(&mut self, without_recurrence: bool) {
        self.injection_outcome = Some(without_recurrence);
    }
}
