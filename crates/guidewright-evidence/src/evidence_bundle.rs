use crate::quote_type::{CarrierInstructionKind, CarrierQuoteType};
use crate::stage::Stage;
use serde::{Deserialize, Serialize};

/// Structured output of the external Attribution Agent (§6): everything the
/// Failure-Mode Resolver and Noncompliance Checker need to classify a
/// Finding. The core never produces this itself — it is handed in by the
/// `AttributionAgent` collaborator and stored verbatim on the resulting
/// `PatternOccurrence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub carrier_stage: Stage,
    pub carrier_quote: String,
    pub carrier_quote_type: CarrierQuoteType,
    pub carrier_instruction_kind: CarrierInstructionKind,
    pub has_citation: bool,
    pub source_retrievable: bool,
    /// `None` when the cited source could not be compared at all (e.g. not
    /// retrievable); `Some(false)` is the specific "disagrees" signal rule
    /// 2 of the resolver looks for.
    pub source_agrees_with_carrier: Option<bool>,
    pub mandatory_doc_missing: bool,
    pub has_testable_acceptance_criteria: bool,
    pub conflict_signals: Vec<String>,
    pub vagueness_signals: Vec<String>,
}

impl EvidenceBundle {
    pub fn has_conflict_signals(&self) -> bool {
        !self.conflict_signals.is_empty()
    }

    pub fn has_vagueness_signals(&self) -> bool {
        !self.vagueness_signals.is_empty()
    }

    /// Rule 2's `sourceAgreesWithCarrier == false` check.
    pub fn source_explicitly_disagrees(&self) -> bool {
        self.source_agrees_with_carrier == Some(false)
    }
}
