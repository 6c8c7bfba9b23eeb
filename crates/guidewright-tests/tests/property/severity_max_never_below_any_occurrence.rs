//! §8 invariant 1: for every Pattern, `severityMax` ranks at or above every
//! occurrence severity ever recorded against it — `bump_severity` is a
//! compare-and-assign maximum, so this must hold after any sequence of
//! recorded severities.

use guidewright_evidence::{
    CarrierQuoteType, FailureMode, PatternId, ProjectId, Scope, ScoutType, Severity, Stage, Tags,
    WorkspaceId,
};
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

fn scope() -> Scope {
    Scope::new(
        WorkspaceId::new(Uuid::from_u128(1)),
        ProjectId::new(Uuid::from_u128(2)),
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn severity_max_is_the_running_maximum(severities in proptest::collection::vec(severity_strategy(), 1..20)) {
        let mut pattern = Pattern::new(
            PatternId::new(Uuid::from_u128(1)),
            scope(),
            "carrier excerpt",
            Stage::ContextPack,
            ScoutType::Security,
            FailureMode::Incorrect,
            severities[0],
            CarrierQuoteType::Verbatim,
            Tags::default(),
            false,
            0,
        );

        let mut running_max = severities[0];
        for &s in &severities[1..] {
            pattern.bump_severity(s);
            running_max = running_max.max(s);
            prop_assert_eq!(pattern.severity_max(), running_max);
            prop_assert!(pattern.severity_max() >= s);
        }
    }
}
