use guidewright_evidence::{CarrierInstructionKind, EvidenceBundle, FailureMode};

/// Verbatim rationale for a resolved `FailureMode`, kept for audit so a
/// caller never has to re-derive why a rule fired.
pub type Reasoning = String;

/// Attributes an `EvidenceBundle` to exactly one `FailureMode`, via the
/// fixed, top-to-bottom seven-rule decision tree in §4.E. The first
/// matching rule wins; this is a pure function with no clock reads, store
/// lookups, or randomness — identical input always yields identical
/// output.
pub struct FailureModeResolver;

impl FailureModeResolver {
    pub fn resolve(evidence: &EvidenceBundle) -> (FailureMode, Reasoning) {
        // Rule 1: a mandatory doc was missing and nothing was cited for it.
        if evidence.mandatory_doc_missing && !evidence.has_citation {
            return (
                FailureMode::MissingReference,
                "rule 1: mandatoryDocMissing && !hasCitation".into(),
            );
        }

        // Rule 2: a citation exists, its source was retrievable, and the
        // source disagrees with what the carrier said.
        if evidence.has_citation
            && evidence.source_retrievable
            && evidence.source_explicitly_disagrees()
        {
            return (
                FailureMode::SynthesisDrift,
                "rule 2: hasCitation && sourceRetrievable && sourceAgreesWithCarrier == false"
                    .into(),
            );
        }

        // Rule 3: the evidence carries unresolved conflict signals.
        if evidence.has_conflict_signals() {
            return (
                FailureMode::ConflictUnresolved,
                "rule 3: conflictSignals.nonEmpty".into(),
            );
        }

        // Rule 4: vague guidance with no testable acceptance criteria.
        if evidence.has_vagueness_signals() && !evidence.has_testable_acceptance_criteria {
            return (
                FailureMode::Ambiguous,
                "rule 4: vaguenessSignals.nonEmpty && !hasTestableAcceptanceCriteria".into(),
            );
        }

        // Rule 5: the carrier explicitly instructed the harmful behaviour.
        if evidence.carrier_instruction_kind == CarrierInstructionKind::ExplicitlyHarmful {
            return (
                FailureMode::Incorrect,
                "rule 5: carrierInstructionKind == explicitly_harmful".into(),
            );
        }

        // Rule 6: the carrier was benign but missing guardrails.
        if evidence.carrier_instruction_kind
            == CarrierInstructionKind::BenignButMissingGuardrails
        {
            return (
                FailureMode::Incomplete,
                "rule 6: carrierInstructionKind == benign_but_missing_guardrails".into(),
            );
        }

        // Rule 7: default.
        (
            FailureMode::Incomplete,
            "rule 7: default — no earlier rule matched".into(),
        )
    }
}
