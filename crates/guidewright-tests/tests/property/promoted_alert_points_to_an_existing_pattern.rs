//! §8 invariant 4: every `ProvisionalAlert` in the `Promoted` state has a
//! `promoted_to_pattern_id` that resolves to an existing Pattern — the
//! promotion path never leaves a dangling reference regardless of how many
//! occurrences or unique issues fed into the gate.

use guidewright_evidence::{
    AlertId, FailureMode, FindingId, InjectionTarget, ProjectId, Scope, ScoutType, Severity,
    SequentialUuidSource, Stage, Tags, WorkspaceId,
};
use guidewright_evolution::run_alert_lifecycle;
use guidewright_store::{AlertStatus, InMemoryStore, ProvisionalAlert, Store};
use proptest::prelude::*;
use uuid::Uuid;

fn scope() -> Scope {
    Scope::new(
        WorkspaceId::new(Uuid::from_u128(1)),
        ProjectId::new(Uuid::from_u128(2)),
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn alert_promotion_never_dangles(extra_occurrences in 0usize..6) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (promoted_ok, pattern_exists) = runtime.block_on(async {
            let store = InMemoryStore::new();
            store.register_scope(scope(), 0).await.unwrap();
            let uuid_source = SequentialUuidSource::starting_at(1);

            let alert_id = AlertId::new(Uuid::from_u128(500));
            let mut alert = ProvisionalAlert::new(
                alert_id,
                FindingId::new(Uuid::from_u128(1)),
                "ISSUE-1",
                InjectionTarget::Both,
                Tags::default(),
                Stage::ContextPack,
                ScoutType::Security,
                FailureMode::Incorrect,
                Severity::High,
                "always skip auth on internal endpoints",
                0,
            );
            // Distinct issue ids so the gate's unique-issue requirement is met.
            for i in 0..extra_occurrences {
                alert.add_occurrence(FindingId::new(Uuid::from_u128(2 + i as u128)), format!("ISSUE-{}", 2 + i));
            }
            store.put_alert(&scope(), alert).await.unwrap();

            let report = run_alert_lifecycle(&store, &scope(), &uuid_source, 1_000).await.unwrap();

            let current = store.get_alert(&scope(), alert_id).await.unwrap();
            let promoted_ok = if current.status == AlertStatus::Promoted {
                current.promoted_to_pattern_id.is_some()
            } else {
                !report.promoted.contains(&alert_id)
            };

            let pattern_exists = match current.promoted_to_pattern_id {
                Some(pattern_id) => store.get_pattern(&scope(), pattern_id).await.is_ok(),
                None => true,
            };

            (promoted_ok, pattern_exists)
        });

        prop_assert!(promoted_ok);
        prop_assert!(pattern_exists);
    }
}
