use guidewright_evidence::{CarrierInstructionKind, CarrierQuoteType, EvidenceBundle, Finding, FindingId};
use serde::{Deserialize, Serialize};

/// Closed set of causes the Noncompliance Checker may attribute an
/// execution-side failure to. `ambiguity` is deliberately absent — a
/// guidance ambiguity is a guidance defect and the resolver emits
/// `FailureMode::Ambiguous` for it instead (§4.F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PossibleCause {
    /// The guidance existed but was not surfaced prominently enough to be
    /// noticed during the task.
    Salience,
    /// The guidance's formatting (buried in prose, no callout) made it easy
    /// to skim past.
    Formatting,
    /// The agent (or a human) explicitly overrode the guidance.
    Override,
}

const OVERRIDE_MARKERS: &[&str] = &["override", "ignored the guidance", "explicitly skipped"];

/// A record ready to be written as an `ExecutionNoncompliance` if the
/// orchestrator accepts this verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionNoncomplianceDraft {
    pub finding_id: FindingId,
    pub possible_causes: Vec<PossibleCause>,
    pub detail: String,
}

/// Decides whether a Finding reflects an execution-side failure — the
/// carrier contained testable, unambiguous guidance covering the case, but
/// the implementation violated it anyway — as opposed to a guidance-side
/// defect the Failure-Mode Resolver should classify instead.
pub struct NoncomplianceChecker;

impl NoncomplianceChecker {
    pub fn check(
        finding: &Finding,
        evidence: &EvidenceBundle,
    ) -> (bool, Option<ExecutionNoncomplianceDraft>) {
        let guidance_was_clear_and_testable = evidence.has_testable_acceptance_criteria
            && !evidence.has_vagueness_signals()
            && !evidence.has_conflict_signals()
            && !evidence.mandatory_doc_missing
            && evidence.carrier_instruction_kind == CarrierInstructionKind::Descriptive
            && evidence.carrier_quote_type != CarrierQuoteType::Inferred;

        if !guidance_was_clear_and_testable {
            return (false, None);
        }

        let draft = ExecutionNoncomplianceDraft {
            finding_id: finding.id,
            possible_causes: Self::possible_causes(finding),
            detail: format!(
                "carrier contained testable, unambiguous guidance (\"{}\") matching {} but the implementation in {} violated it",
                evidence.carrier_quote, finding.scout_type, finding.location.file
            ),
        };
        (true, Some(draft))
    }

    fn possible_causes(finding: &Finding) -> Vec<PossibleCause> {
        let haystack = format!("{} {}", finding.description, finding.evidence).to_lowercase();
        let mut causes = Vec::new();
        if OVERRIDE_MARKERS.iter().any(|m| haystack.contains(m)) {
            causes.push(PossibleCause::Override);
        }
        if haystack.contains("formatting") || haystack.contains("markdown") {
            causes.push(PossibleCause::Formatting);
        }
        if causes.is_empty() {
            // Default: no explicit override or formatting signal found, so
            // the most likely cause is that the guidance simply wasn't
            // salient enough to surface during the task.
            causes.push(PossibleCause::Salience);
        }
        causes
    }
}
