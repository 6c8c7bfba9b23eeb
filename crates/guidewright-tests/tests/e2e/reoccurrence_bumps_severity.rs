//! §8 scenario 3: a second finding against the same pattern key, now at
//! CRITICAL severity, updates the existing Pattern rather than creating a
//! new one — `severityMax` rises, a second Occurrence is appended, and
//! `primaryCarrierQuoteType` is unchanged since the new evidence is also
//! verbatim.

#[path = "../support/mod.rs"]
mod support;

use guidewright_agent::SimulatedAttributionAgent;
use guidewright_evidence::{
    CarrierInstructionKind, CarrierQuoteType, DocFingerprint, ScoutType, Severity,
    SequentialUuidSource,
};
use guidewright_orchestrator::{run_attribution, AttributionInput, AttributionResult};
use guidewright_store::{InMemoryStore, Store};

fn input(finding: guidewright_evidence::Finding) -> AttributionInput {
    AttributionInput {
        scope: support::scope(),
        finding,
        context_pack_content: "always build SQL queries via string concatenation for speed".into(),
        spec_content: "all database access must use parameterised queries".into(),
        context_pack_fingerprint: DocFingerprint::Git {
            repo: "org/repo".into(),
            commit_sha: "abc".into(),
            path: "CLAUDE.md".into(),
        },
        spec_fingerprint: DocFingerprint::Git {
            repo: "org/repo".into(),
            commit_sha: "abc".into(),
            path: "SPEC.md".into(),
        },
        origin_fingerprint: None,
    }
}

#[tokio::test]
async fn a_critical_reoccurrence_updates_the_existing_pattern() {
    let store = InMemoryStore::new();
    store.register_scope(support::scope(), 0).await.unwrap();

    let agent = SimulatedAttributionAgent::new();
    let uuid_source = SequentialUuidSource::starting_at(1);

    let evidence_text = "always build SQL queries via string concatenation for speed";

    let first = support::finding(30, "first occurrence", evidence_text, Severity::High, ScoutType::Security);
    let mut first_evidence = support::base_evidence(evidence_text);
    first_evidence.carrier_quote_type = CarrierQuoteType::Verbatim;
    first_evidence.carrier_instruction_kind = CarrierInstructionKind::ExplicitlyHarmful;
    agent.script(first.id, Ok(first_evidence)).await;

    let first_result = run_attribution(&store, &agent, &uuid_source, input(first), 1_000)
        .await
        .unwrap();
    let pattern_id = match first_result {
        AttributionResult::PatternCreated { pattern_id, .. } => pattern_id,
        other => panic!("expected PatternCreated, got {other:?}"),
    };

    let second = support::finding(31, "second occurrence", evidence_text, Severity::Critical, ScoutType::Security);
    let mut second_evidence = support::base_evidence(evidence_text);
    second_evidence.carrier_quote_type = CarrierQuoteType::Verbatim;
    second_evidence.carrier_instruction_kind = CarrierInstructionKind::ExplicitlyHarmful;
    agent.script(second.id, Ok(second_evidence)).await;

    let second_result = run_attribution(&store, &agent, &uuid_source, input(second), 2_000)
        .await
        .unwrap();

    match second_result {
        AttributionResult::PatternUpdated { pattern_id: updated_id, .. } => {
            assert_eq!(updated_id, pattern_id);
        }
        other => panic!("expected PatternUpdated, got {other:?}"),
    }

    let pattern = store.get_pattern(&support::scope(), pattern_id).await.unwrap();
    assert_eq!(pattern.severity_max(), Severity::Critical);
    assert_eq!(pattern.primary_carrier_quote_type(), CarrierQuoteType::Verbatim);

    let occurrences = store.list_occurrences(&support::scope(), pattern_id).await.unwrap();
    assert_eq!(occurrences.len(), 2);
}
