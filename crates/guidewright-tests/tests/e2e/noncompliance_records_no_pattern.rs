//! §8 scenario 5: clear, testable, verbatim, descriptive guidance that the
//! implementation violated anyway is an execution-side failure, not a
//! guidance defect — it produces an `ExecutionNoncompliance` record and
//! upserts a `SalienceIssue` for the carrier location, but never a Pattern.

#[path = "../support/mod.rs"]
mod support;

use guidewright_agent::SimulatedAttributionAgent;
use guidewright_evidence::{DocFingerprint, ScoutType, Severity, SequentialUuidSource};
use guidewright_orchestrator::{run_attribution, AttributionInput, AttributionResult};
use guidewright_store::{InMemoryStore, Store};

#[tokio::test]
async fn clear_guidance_violated_anyway_is_noncompliance_not_a_pattern() {
    let store = InMemoryStore::new();
    store.register_scope(support::scope(), 0).await.unwrap();

    let agent = SimulatedAttributionAgent::new();
    let uuid_source = SequentialUuidSource::starting_at(1);

    let finding = support::finding(
        50,
        "query built via string concatenation despite clear guidance",
        "raw string concatenation used in handler",
        Severity::Medium,
        ScoutType::Bugs,
    );

    // base_evidence() is already clear, testable, verbatim, descriptive —
    // exactly the shape NoncomplianceChecker::check gates on.
    let evidence = support::base_evidence("MUST use parameterised queries for all SQL");
    agent.script(finding.id, Ok(evidence)).await;

    let input = AttributionInput {
        scope: support::scope(),
        finding,
        context_pack_content: "MUST use parameterised queries for all SQL".into(),
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

    assert!(matches!(result, AttributionResult::Noncompliance { .. }));
    assert!(store.list_active_patterns(&support::scope()).await.unwrap().is_empty());

    let pending = store.list_pending_salience_issues(&support::scope()).await.unwrap();
    assert_eq!(pending.len(), 1);
}
