//! §8 invariant 8: kill-switch monotonicity — once `auto_resume_at_ms` is
//! set on a scope's status, it is only ever cleared when the state
//! transitions back to `Active`. A state that stays paused (or moves
//! between the two paused states) never drops its resume deadline.

use guidewright_evidence::{CarrierQuoteType, FindingId, OutcomeId, ProjectId, Scope, WorkspaceId};
use guidewright_killswitch::KillSwitchController;
use guidewright_store::{AttributionOutcome, InMemoryStore, KillSwitchState, Store};
use proptest::prelude::*;
use uuid::Uuid;

fn scope() -> Scope {
    Scope::new(
        WorkspaceId::new(Uuid::from_u128(1)),
        ProjectId::new(Uuid::from_u128(2)),
    )
}

fn quote_type_strategy() -> impl Strategy<Value = CarrierQuoteType> {
    prop_oneof![
        Just(CarrierQuoteType::Inferred),
        Just(CarrierQuoteType::Paraphrase),
        Just(CarrierQuoteType::Verbatim),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    /// Feeds a sequence of outcome batches through `evaluate_health`, one
    /// call per `now_ms` step, and checks after every step: whenever the
    /// resume deadline goes from `Some` to `None`, the state landed on
    /// `Active`.
    #[test]
    fn auto_resume_only_clears_on_return_to_active(
        quote_types in proptest::collection::vec(quote_type_strategy(), 0..30),
    ) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let violations = runtime.block_on(async {
            let store = InMemoryStore::new();
            store.register_scope(scope(), 0).await.unwrap();

            let mut violations = 0usize;
            let mut previous_resume = None;
            let mut step = 0u64;
            let mut next_id = 1u128;

            // Step through in batches of 5 outcomes so the rolling window
            // metrics actually move between healthy and breaching bands.
            for chunk in quote_types.chunks(5) {
                step += 1;
                let now_ms = step * 1_000;
                for quote_type in chunk {
                    let outcome = AttributionOutcome {
                        id: OutcomeId::new(Uuid::from_u128(next_id)),
                        finding_id: FindingId::new(Uuid::from_u128(next_id)),
                        carrier_quote_type: *quote_type,
                        pattern_created: *quote_type != CarrierQuoteType::Inferred,
                        injection_outcome: None,
                        reasoning: "scripted".into(),
                        created_at_ms: now_ms,
                    };
                    next_id += 1;
                    store.put_outcome(&scope(), outcome).await.unwrap();
                }

                let status = KillSwitchController::evaluate_health(&store, &scope(), now_ms)
                    .await
                    .unwrap();

                if previous_resume.is_some() && status.auto_resume_at_ms.is_none() && status.state != KillSwitchState::Active {
                    violations += 1;
                }
                previous_resume = status.auto_resume_at_ms;
            }

            violations
        });

        prop_assert_eq!(violations, 0);
    }
}
