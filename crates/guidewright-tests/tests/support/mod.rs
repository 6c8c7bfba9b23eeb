//! Shared fixtures for the e2e scenarios: a scope, a finding builder, and a
//! default evidence bundle each scenario tweaks the one or two fields it
//! cares about.

use guidewright_evidence::{
    CarrierInstructionKind, CarrierQuoteType, EvidenceBundle, Finding, FindingId, Location,
    ProjectId, Scope, ScoutType, Severity, Stage, WorkspaceId,
};
use uuid::Uuid;

pub fn scope() -> Scope {
    Scope::new(
        WorkspaceId::new(Uuid::from_u128(1)),
        ProjectId::new(Uuid::from_u128(2)),
    )
}

#[allow(dead_code)]
pub fn finding(
    seed: u128,
    title: &str,
    evidence: &str,
    severity: Severity,
    scout_type: ScoutType,
) -> Finding {
    Finding::new(
        FindingId::new(Uuid::from_u128(seed)),
        "ISSUE-1",
        1,
        title,
        "fixture finding for a cross-crate scenario",
        scout_type,
        severity,
        evidence,
        Location {
            file: "CLAUDE.md".into(),
            line: Some(1),
        },
    )
    .expect("fixture findings satisfy the Finding schema")
}

/// Clear, testable, verbatim, descriptive evidence — the "nothing unusual"
/// baseline every scenario starts from and mutates the fields it needs.
#[allow(dead_code)]
pub fn base_evidence(quote: &str) -> EvidenceBundle {
    EvidenceBundle {
        carrier_stage: Stage::ContextPack,
        carrier_quote: quote.to_string(),
        carrier_quote_type: CarrierQuoteType::Verbatim,
        carrier_instruction_kind: CarrierInstructionKind::Descriptive,
        has_citation: false,
        source_retrievable: false,
        source_agrees_with_carrier: None,
        mandatory_doc_missing: false,
        has_testable_acceptance_criteria: true,
        conflict_signals: vec![],
        vagueness_signals: vec![],
    }
}
