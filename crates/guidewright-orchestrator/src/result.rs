use guidewright_evidence::{AlertId, DocUpdateRequestId, NoncomplianceId, OccurrenceId, PatternId};

/// What a `run_attribution` call actually did, mirroring the branch of §4.G
/// step 5-9 that fired. Every variant corresponds to a row (or lack of one)
/// that was written; the `AttributionOutcome` record itself is always
/// written regardless of which variant comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributionResult {
    /// A brand-new Pattern was created (step 8, absent case) and an
    /// Occurrence appended to it (step 9).
    PatternCreated {
        pattern_id: PatternId,
        occurrence_id: OccurrenceId,
    },
    /// An existing Pattern absorbed this finding (step 8, found case) and
    /// an Occurrence was appended to it (step 9).
    PatternUpdated {
        pattern_id: PatternId,
        occurrence_id: OccurrenceId,
    },
    /// High-severity inferred evidence landed below the Pattern gate (step
    /// 7). `promoted_to` is set when this occurrence was the one that
    /// synchronously pushed the alert past the promotion gate (§4.K).
    ProvisionalAlert {
        alert_id: AlertId,
        promoted_to: Option<PatternId>,
    },
    /// `scoutType == decisions` (step 6). `promoted_to` is set when severity
    /// or same-class recurrence cleared the promotion bar.
    DocUpdateRequested {
        request_id: DocUpdateRequestId,
        promoted_to: Option<PatternId>,
    },
    /// Execution-side failure (step 4): the carrier held clear, testable
    /// guidance and the implementation violated it anyway.
    Noncompliance { noncompliance_id: NoncomplianceId },
    /// The kill-switch gate (step 5) turned this attribution away before
    /// any Pattern, Alert, or DocUpdateRequest was considered.
    SkippedByKillSwitch { reason: String },
}
