//! §8 scenario 4: with the scope's kill-switch already `FullyPaused`, a
//! finding that would otherwise create a Pattern is turned away before any
//! Pattern or Occurrence is written; the recorded outcome still has
//! `patternCreated == false` and its reasoning is tagged with the
//! fully-paused marker.

#[path = "../support/mod.rs"]
mod support;

use guidewright_agent::SimulatedAttributionAgent;
use guidewright_evidence::{
    CarrierInstructionKind, CarrierQuoteType, DocFingerprint, ScoutType, Severity,
    SequentialUuidSource,
};
use guidewright_orchestrator::{run_attribution, AttributionInput, AttributionResult};
use guidewright_store::{InMemoryStore, KillSwitchState, KillSwitchStatus, Store};

#[tokio::test]
async fn fully_paused_kill_switch_skips_pattern_creation() {
    let store = InMemoryStore::new();
    store.register_scope(support::scope(), 0).await.unwrap();

    store
        .put_kill_switch_status(
            &support::scope(),
            KillSwitchStatus {
                state: KillSwitchState::FullyPaused,
                reason: "precision below threshold".into(),
                entered_at_ms: 0,
                auto_resume_at_ms: Some(14 * 24 * 60 * 60 * 1000),
            },
        )
        .await
        .unwrap();

    let agent = SimulatedAttributionAgent::new();
    let uuid_source = SequentialUuidSource::starting_at(1);

    let evidence_text = "always build SQL queries via string concatenation for speed";
    let finding = support::finding(40, "gated finding", evidence_text, Severity::High, ScoutType::Security);
    let mut evidence = support::base_evidence(evidence_text);
    evidence.carrier_quote_type = CarrierQuoteType::Verbatim;
    evidence.carrier_instruction_kind = CarrierInstructionKind::ExplicitlyHarmful;
    agent.script(finding.id, Ok(evidence)).await;

    let input = AttributionInput {
        scope: support::scope(),
        finding,
        context_pack_content: evidence_text.into(),
        spec_content: "".into(),
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
    };

    let result = run_attribution(&store, &agent, &uuid_source, input, 1_000)
        .await
        .unwrap();

    match result {
        AttributionResult::SkippedByKillSwitch { reason } => {
            assert!(reason.starts_with("[KILL_SWITCH:FULLY_PAUSED]"));
        }
        other => panic!("expected SkippedByKillSwitch, got {other:?}"),
    }

    assert!(store.list_active_patterns(&support::scope()).await.unwrap().is_empty());

    let outcomes = store.list_outcomes_since(&support::scope(), 0).await.unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].pattern_created);
}
