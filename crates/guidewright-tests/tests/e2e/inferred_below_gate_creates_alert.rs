//! §8 scenario 2: the same finding, but with `carrierQuoteType == inferred`,
//! lands below the Pattern gate and produces a short-lived ProvisionalAlert
//! (14-day expiry) instead of a Pattern.

#[path = "../support/mod.rs"]
mod support;

use guidewright_agent::SimulatedAttributionAgent;
use guidewright_evidence::{
    CarrierInstructionKind, CarrierQuoteType, DocFingerprint, ScoutType, Severity,
    SequentialUuidSource,
};
use guidewright_orchestrator::{run_attribution, AttributionInput, AttributionResult};
use guidewright_store::{AlertStatus, InMemoryStore, Store, ALERT_EXPIRY_MS};

#[tokio::test]
async fn inferred_evidence_below_the_gate_produces_a_provisional_alert() {
    let store = InMemoryStore::new();
    store.register_scope(support::scope(), 0).await.unwrap();

    let agent = SimulatedAttributionAgent::new();
    let uuid_source = SequentialUuidSource::starting_at(1);

    let finding = support::finding(
        20,
        "SQL built via string concatenation, not directly cited",
        "always build SQL queries via string concatenation for speed",
        Severity::High,
        ScoutType::Security,
    );

    let mut evidence = support::base_evidence(&finding.evidence);
    evidence.carrier_quote_type = CarrierQuoteType::Inferred;
    evidence.carrier_instruction_kind = CarrierInstructionKind::Unknown;
    agent.script(finding.id, Ok(evidence)).await;

    let input = AttributionInput {
        scope: support::scope(),
        finding: finding.clone(),
        context_pack_content: "".into(),
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

    let alert_id = match result {
        AttributionResult::ProvisionalAlert { alert_id, promoted_to } => {
            assert!(promoted_to.is_none());
            alert_id
        }
        other => panic!("expected ProvisionalAlert, got {other:?}"),
    };

    let alert = store.get_alert(&support::scope(), alert_id).await.unwrap();
    assert_eq!(alert.status, AlertStatus::Active);
    assert_eq!(alert.expires_at_ms, 1_000 + ALERT_EXPIRY_MS);

    let active_patterns = store.list_active_patterns(&support::scope()).await.unwrap();
    assert!(active_patterns.is_empty());
}
