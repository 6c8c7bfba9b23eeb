//! §8 invariant 3: at most one active Pattern exists per
//! `(workspace, project, patternKey)` — repeated findings carrying the same
//! carrier stage, quote, and finding category must always upsert the same
//! Pattern row, never create a sibling.

use guidewright_agent::SimulatedAttributionAgent;
use guidewright_evidence::{
    CarrierInstructionKind, CarrierQuoteType, DocFingerprint, EvidenceBundle, ScoutType, Severity,
    SequentialUuidSource, Stage,
};
use guidewright_orchestrator::{run_attribution, AttributionInput};
use guidewright_store::{InMemoryStore, Pattern, Store};
use proptest::prelude::*;
use std::collections::HashMap;
use uuid::Uuid;
use guidewright_evidence::{FindingId, Location, ProjectId, Scope, WorkspaceId};

fn scope() -> Scope {
    Scope::new(
        WorkspaceId::new(Uuid::from_u128(1)),
        ProjectId::new(Uuid::from_u128(2)),
    )
}

fn quote_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("always build SQL via string concatenation"),
        Just("never validate user input before use"),
        Just("skip authentication on internal endpoints"),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn repeated_same_quote_findings_never_fork_a_pattern(quotes in proptest::collection::vec(quote_strategy(), 1..15)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let by_key: HashMap<_, usize> = runtime.block_on(async {
            let store = InMemoryStore::new();
            store.register_scope(scope(), 0).await.unwrap();
            let agent = SimulatedAttributionAgent::new();
            let uuid_source = SequentialUuidSource::starting_at(1);

            for (i, quote) in quotes.iter().enumerate() {
                let finding = guidewright_evidence::Finding::new(
                    FindingId::new(Uuid::from_u128(1000 + i as u128)),
                    "ISSUE-1",
                    1,
                    "repeated finding",
                    "property-test fixture",
                    ScoutType::Security,
                    Severity::High,
                    *quote,
                    Location { file: "CLAUDE.md".into(), line: Some(1) },
                )
                .unwrap();

                let evidence = EvidenceBundle {
                    carrier_stage: Stage::ContextPack,
                    carrier_quote: quote.to_string(),
                    carrier_quote_type: CarrierQuoteType::Verbatim,
                    carrier_instruction_kind: CarrierInstructionKind::ExplicitlyHarmful,
                    has_citation: false,
                    source_retrievable: false,
                    source_agrees_with_carrier: None,
                    mandatory_doc_missing: false,
                    has_testable_acceptance_criteria: true,
                    conflict_signals: vec![],
                    vagueness_signals: vec![],
                };
                agent.script(finding.id, Ok(evidence)).await;

                let input = AttributionInput {
                    scope: scope(),
                    finding,
                    context_pack_content: quote.to_string(),
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

                run_attribution(&store, &agent, &uuid_source, input, 1_000 + i as u64)
                    .await
                    .unwrap();
            }

            let active: Vec<Pattern> = store.list_active_patterns(&scope()).await.unwrap();
            let mut by_key: HashMap<_, usize> = HashMap::new();
            for pattern in &active {
                *by_key.entry(pattern.pattern_key).or_insert(0) += 1;
            }
            by_key
        });

        for count in by_key.values() {
            prop_assert_eq!(*count, 1);
        }
    }
}
