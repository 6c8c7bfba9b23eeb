//! §8 invariant 6: `FailureModeResolver::resolve` is a pure function — the
//! same `EvidenceBundle` always yields the same `(FailureMode, Reasoning)`
//! pair, regardless of how many times or in what order it is called.

use guidewright_evidence::{CarrierInstructionKind, CarrierQuoteType, EvidenceBundle, Stage};
use guidewright_resolver::FailureModeResolver;
use proptest::prelude::*;

fn quote_type_strategy() -> impl Strategy<Value = CarrierQuoteType> {
    prop_oneof![
        Just(CarrierQuoteType::Inferred),
        Just(CarrierQuoteType::Paraphrase),
        Just(CarrierQuoteType::Verbatim),
    ]
}

fn instruction_kind_strategy() -> impl Strategy<Value = CarrierInstructionKind> {
    prop_oneof![
        Just(CarrierInstructionKind::ExplicitlyHarmful),
        Just(CarrierInstructionKind::BenignButMissingGuardrails),
        Just(CarrierInstructionKind::Descriptive),
        Just(CarrierInstructionKind::Unknown),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn resolve_is_deterministic(
        quote_type in quote_type_strategy(),
        instruction_kind in instruction_kind_strategy(),
        has_citation in any::<bool>(),
        source_retrievable in any::<bool>(),
        source_agrees in proptest::option::of(any::<bool>()),
        mandatory_doc_missing in any::<bool>(),
        has_testable_acceptance_criteria in any::<bool>(),
        has_conflict_signal in any::<bool>(),
        has_vagueness_signal in any::<bool>(),
    ) {
        let evidence = EvidenceBundle {
            carrier_stage: Stage::ContextPack,
            carrier_quote: "excerpt".into(),
            carrier_quote_type: quote_type,
            carrier_instruction_kind: instruction_kind,
            has_citation,
            source_retrievable,
            source_agrees_with_carrier: source_agrees,
            mandatory_doc_missing,
            has_testable_acceptance_criteria,
            conflict_signals: if has_conflict_signal { vec!["conflict".into()] } else { vec![] },
            vagueness_signals: if has_vagueness_signal { vec!["vague".into()] } else { vec![] },
        };

        let (first_mode, first_reasoning) = FailureModeResolver::resolve(&evidence);
        for _ in 0..5 {
            let (mode, reasoning) = FailureModeResolver::resolve(&evidence);
            prop_assert_eq!(mode, first_mode);
            prop_assert_eq!(reasoning, first_reasoning.clone());
        }
    }
}
