//! §8 scenario 6, exercised through the `Engine` facade rather than calling
//! `select_injections` directly: one baseline principle, one derived
//! principle, and three project patterns (two security HIGH, one
//! correctness MEDIUM), all overlapping the requested TaskProfile. Expect
//! baseline, then derived, then the two security patterns ahead of the
//! correctness one.

use guidewright_agent::SimulatedAttributionAgent;
use guidewright_engine::{Engine, NullSink};
use guidewright_evidence::{
    CarrierQuoteType, FailureMode, InjectionTarget, PatternId, PrincipleId, ProjectId, RandomUuidSource,
    Scope, ScoutType, Severity, Stage, SystemClock, Tags, TaskProfile, WorkspaceId,
};
use guidewright_selector::SelectionRequest;
use guidewright_store::{DerivedPrinciple, InMemoryStore, Pattern, Store};
use std::sync::Arc;
use uuid::Uuid;

fn scope() -> Scope {
    Scope::new(
        WorkspaceId::new(Uuid::from_u128(11)),
        ProjectId::new(Uuid::from_u128(12)),
    )
}

fn tags(touches: &[&str]) -> Tags {
    Tags::new(touches.iter().map(|s| s.to_string()), vec![], vec![])
}

fn project_pattern(id: u128, finding_category: ScoutType, severity: Severity, touches: &[&str]) -> Pattern {
    Pattern::new(
        PatternId::new(Uuid::from_u128(id)),
        scope(),
        format!("pattern-{id}"),
        Stage::ContextPack,
        finding_category,
        FailureMode::Incorrect,
        severity,
        CarrierQuoteType::Verbatim,
        tags(touches),
        false,
        0,
    )
}

#[tokio::test]
async fn engine_select_orders_baseline_derived_then_security_before_correctness() {
    let store = Arc::new(InMemoryStore::new());
    store.register_scope(scope(), 0).await.unwrap();

    let baseline = DerivedPrinciple::new_baseline(
        PrincipleId::new(Uuid::from_u128(100)),
        scope().workspace_id,
        "never concatenate SQL",
        InjectionTarget::Both,
        tags(&["database"]),
        0,
    );
    let derived = DerivedPrinciple::promote(
        PrincipleId::new(Uuid::from_u128(101)),
        scope().workspace_id,
        "validate all API inputs",
        InjectionTarget::Both,
        vec![PatternId::new(Uuid::from_u128(900))],
        tags(&["api"]),
        0,
    );
    store.put_principle(scope().workspace_id, baseline).await.unwrap();
    store.put_principle(scope().workspace_id, derived).await.unwrap();

    store
        .put_pattern(project_pattern(1, ScoutType::Security, Severity::High, &["database", "api"]))
        .await
        .unwrap();
    store
        .put_pattern(project_pattern(2, ScoutType::Security, Severity::High, &["database", "api"]))
        .await
        .unwrap();
    store
        .put_pattern(project_pattern(3, ScoutType::Bugs, Severity::Medium, &["database", "api"]))
        .await
        .unwrap();

    let engine = Engine::new(
        store.clone(),
        Arc::new(SimulatedAttributionAgent::new()),
        Arc::new(RandomUuidSource),
        Arc::new(SystemClock),
        Arc::new(NullSink),
    );

    let task_profile = TaskProfile::new(tags(&["database", "api"]), 0.8);
    let request = SelectionRequest::new(scope(), Stage::ContextPack, task_profile);
    let bundle = engine.select(request).await.unwrap();

    assert_eq!(bundle.warnings.len(), 4);
    assert!(matches!(
        bundle.warnings[0].source,
        guidewright_selector::WarningSource::BaselinePrinciple(_)
    ));
    assert!(matches!(
        bundle.warnings[1].source,
        guidewright_selector::WarningSource::DerivedPrinciple(_)
    ));
    assert!(matches!(bundle.warnings[2].source, guidewright_selector::WarningSource::Pattern(_)));
    assert!(matches!(bundle.warnings[3].source, guidewright_selector::WarningSource::Pattern(_)));
    assert_eq!(bundle.warnings[2].category, guidewright_selector::WarningCategory::Security);
    assert_eq!(bundle.warnings[3].category, guidewright_selector::WarningCategory::Security);
}
