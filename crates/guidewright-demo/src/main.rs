//! End-to-end walkthrough of the attribution and evolution engine against
//! an in-memory store, with no external services: a handful of findings
//! go through the orchestrator, the resulting patterns get selected for
//! injection, and a single evolution pass is run over the scope.

use guidewright_agent::SimulatedAttributionAgent;
use guidewright_engine::{ChannelSink, Engine, EngineEvent};
use guidewright_evidence::{
    DocFingerprint, Finding, FindingId, Location, ProjectId, RandomUuidSource, Scope, ScoutType,
    Severity, SystemClock, Tags, TaskProfile, WorkspaceId,
};
use guidewright_orchestrator::AttributionInput;
use guidewright_selector::SelectionRequest;
use guidewright_store::{InMemoryStore, Store};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

fn finding(title: &str, evidence: &str, severity: Severity, scout_type: ScoutType) -> Finding {
    Finding::new(
        FindingId::new(Uuid::new_v4()),
        "DEMO-ISSUE",
        1,
        title,
        "illustrative finding for the demo walkthrough",
        scout_type,
        severity,
        evidence,
        Location {
            file: "src/db.rs".into(),
            line: Some(12),
        },
    )
    .expect("demo findings satisfy the Finding schema")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .init();

    let scope = Scope::new(WorkspaceId::new(Uuid::new_v4()), ProjectId::new(Uuid::new_v4()));

    let store = Arc::new(InMemoryStore::new());
    store.register_scope(scope, 0).await.expect("scope registers");

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let sink = Arc::new(ChannelSink::new(tx));

    let engine = Engine::new(
        store.clone(),
        Arc::new(SimulatedAttributionAgent::new()),
        Arc::new(RandomUuidSource),
        Arc::new(SystemClock),
        sink,
    );

    let context_pack = "CLAUDE.md: always build SQL queries via string concatenation for speed.";
    let spec = "SPEC.md: all database access must use parameterised queries.";
    let context_pack_fp = DocFingerprint::Git {
        repo: "demo/repo".into(),
        commit_sha: "deadbeef".into(),
        path: "CLAUDE.md".into(),
    };
    let spec_fp = DocFingerprint::Git {
        repo: "demo/repo".into(),
        commit_sha: "deadbeef".into(),
        path: "SPEC.md".into(),
    };

    info!("--- attributing three related findings ---");
    for title in ["SQL built via string concatenation in handler A", "same pattern in handler B", "same pattern in handler C"] {
        let input = AttributionInput {
            scope,
            finding: finding(
                title,
                "always build SQL queries via string concatenation for speed",
                Severity::High,
                ScoutType::Security,
            ),
            context_pack_content: context_pack.into(),
            spec_content: spec.into(),
            context_pack_fingerprint: context_pack_fp.clone(),
            spec_fingerprint: spec_fp.clone(),
            origin_fingerprint: None,
        };
        let result = engine.attribute(input).await.expect("attribution succeeds");
        info!(?result, "attribution result");
    }

    info!("--- selecting warnings for a new task touching the database ---");
    let request = SelectionRequest::new(
        scope,
        guidewright_evidence::Stage::ContextPack,
        TaskProfile::new(Tags::new(vec!["database".to_string()], vec![], vec![]), 0.9),
    );
    let bundle = engine.select(request).await.expect("selection succeeds");
    info!(warning_count = bundle.warnings.len(), alert_count = bundle.alerts.len(), "selected bundle");
    for warning in &bundle.warnings {
        info!(text = %warning.text, priority = warning.priority, "warning");
    }

    info!("--- running one evolution pass ---");
    let report = engine.run_evolution(scope).await.expect("evolution pass succeeds");
    info!(
        archived = report.archived_pattern_ids.len(),
        promoted_alerts = report.alerts.promoted.len(),
        principles_promoted = report.principles.promoted.len(),
        "evolution report"
    );

    drop(engine);
    while let Ok(event) = rx.try_recv() {
        log_event(&event);
    }
}

fn log_event(event: &EngineEvent) {
    match event {
        EngineEvent::PatternCreated { pattern_id } => info!(?pattern_id, "event: pattern created"),
        EngineEvent::OccurrenceCreated { occurrence_id } => info!(?occurrence_id, "event: occurrence created"),
        EngineEvent::AlertPromoted { alert_id, pattern_id } => {
            info!(?alert_id, ?pattern_id, "event: alert promoted")
        }
        EngineEvent::KillSwitchChanged { new_state } => info!(?new_state, "event: kill-switch changed"),
        EngineEvent::SalienceDetected { salience_issue_id } => {
            info!(?salience_issue_id, "event: salience detected")
        }
    }
}
