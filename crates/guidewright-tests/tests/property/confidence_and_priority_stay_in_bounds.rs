//! §8 invariant 5: `attributionConfidence` always lands in `[0, 1]` and
//! `injectionPriority` is always non-negative, for any Pattern with at
//! least one occurrence, regardless of severity, quote type, staleness, or
//! overlap counts.

use guidewright_evidence::{
    CarrierQuoteType, FailureMode, PatternId, ProjectId, Scope, ScoutType, Severity, Stage, Tags,
    WorkspaceId,
};
use guidewright_scoring::{attribution_confidence, injection_priority, PatternStats, ScoringInputs};
use guidewright_store::Pattern;
use proptest::prelude::*;
use uuid::Uuid;

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

fn quote_type_strategy() -> impl Strategy<Value = CarrierQuoteType> {
    prop_oneof![
        Just(CarrierQuoteType::Inferred),
        Just(CarrierQuoteType::Paraphrase),
        Just(CarrierQuoteType::Verbatim),
    ]
}

fn scope() -> Scope {
    Scope::new(
        WorkspaceId::new(Uuid::from_u128(1)),
        ProjectId::new(Uuid::from_u128(2)),
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn scores_stay_in_bounds(
        severity in severity_strategy(),
        quote_type in quote_type_strategy(),
        permanent in any::<bool>(),
        active_occurrences in 1usize..100,
        days_stale in 0u64..2000,
        touch_overlaps in 0usize..50,
        tech_overlaps in 0usize..50,
        is_cross_project in any::<bool>(),
        suspected_synthesis_drift in any::<bool>(),
    ) {
        let pattern = Pattern::new(
            PatternId::new(Uuid::from_u128(1)),
            scope(),
            "carrier excerpt",
            Stage::ContextPack,
            ScoutType::Security,
            FailureMode::Incorrect,
            severity,
            quote_type,
            Tags::default(),
            permanent,
            0,
        );

        let now_ms = days_stale * 24 * 60 * 60 * 1000;
        let stats = PatternStats {
            total_occurrences: active_occurrences,
            active_occurrences,
            last_active_at_ms: Some(0),
            injected_occurrences: 0,
            adherence_rate: 0.0,
        };

        let confidence = attribution_confidence(&pattern, &stats, now_ms, suspected_synthesis_drift);
        prop_assert!((0.0..=1.0).contains(&confidence));

        let priority = injection_priority(
            &pattern,
            &stats,
            now_ms,
            ScoringInputs {
                touch_overlaps,
                tech_overlaps,
                is_cross_project,
                suspected_synthesis_drift,
            },
        );
        prop_assert!(priority >= 0.0);
    }
}
