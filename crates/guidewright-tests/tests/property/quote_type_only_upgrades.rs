//! §8 invariant 2: for every Pattern, `primaryCarrierQuoteType` ranks at or
//! above every occurrence's quote type ever observed — `upgrade_quote_type`
//! only ever moves toward `Verbatim`, never back toward `Inferred`.

use guidewright_evidence::{
    CarrierQuoteType, FailureMode, PatternId, ProjectId, Scope, ScoutType, Severity, Stage, Tags,
    WorkspaceId,
};
use guidewright_store::Pattern;
use proptest::prelude::*;
use uuid::Uuid;

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
    fn primary_quote_type_is_the_running_maximum(quote_types in proptest::collection::vec(quote_type_strategy(), 1..20)) {
        let mut pattern = Pattern::new(
            PatternId::new(Uuid::from_u128(1)),
            scope(),
            "carrier excerpt",
            Stage::ContextPack,
            ScoutType::Security,
            FailureMode::Incorrect,
            Severity::Medium,
            quote_types[0],
            Tags::default(),
            false,
            0,
        );

        let mut running_max = quote_types[0];
        for &q in &quote_types[1..] {
            pattern.upgrade_quote_type(q);
            running_max = running_max.max(q);
            prop_assert_eq!(pattern.primary_carrier_quote_type(), running_max);
            prop_assert!(pattern.primary_carrier_quote_type() >= q);
        }
    }
}
