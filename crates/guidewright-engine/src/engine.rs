use crate::error::EngineError;
use crate::event::{EngineEvent, EventSink};
use guidewright_agent::AttributionAgent;
use guidewright_evidence::{Clock, PatternId, Scope, UuidSource};
use guidewright_evolution::{
    run_alert_lifecycle, run_confidence_decay, run_principle_promotion, run_salience_detection,
    AlertLifecycleReport, PrinciplePromotionReport,
};
use guidewright_orchestrator::{run_attribution, AttributionInput, AttributionResult};
use guidewright_selector::{select_injections, InjectionBundle, SelectionRequest};
use guidewright_store::Store;
use std::sync::Arc;
use tracing::info;

/// What one `run_evolution` pass did across the four batch processors.
/// Each processor runs unconditionally; callers that only care about one
/// can read the corresponding field and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvolutionReport {
    pub archived_pattern_ids: Vec<PatternId>,
    pub alerts: AlertLifecycleReport,
    pub salience_issue_ids: Vec<guidewright_evidence::SalienceIssueId>,
    pub principles: PrinciplePromotionReport,
}

/// Wires the Attribution Orchestrator, the Injection Selector, the
/// Kill-Switch Controller, and the Evolution Processors behind one entry
/// point, translating their results into `EngineEvent`s for an observer
/// that never touches the store directly.
pub struct Engine {
    store: Arc<dyn Store>,
    agent: Arc<dyn AttributionAgent>,
    uuid_source: Arc<dyn UuidSource>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn EventSink>,
}

impl Engine {
    pub fn new(
        store: Arc<dyn Store>,
        agent: Arc<dyn AttributionAgent>,
        uuid_source: Arc<dyn UuidSource>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            store,
            agent,
            uuid_source,
            clock,
            sink,
        }
    }

    /// Runs one Finding through the orchestrator's ten-step flow (§4.G)
    /// and emits the corresponding `EngineEvent`s: `PatternCreated` or
    /// `OccurrenceCreated` for the direct and alert-promotion paths, and
    /// `KillSwitchChanged` whenever the scope's state differs from what it
    /// was before the call.
    pub async fn attribute(&self, input: AttributionInput) -> Result<AttributionResult, EngineError> {
        let scope = input.scope;
        let now_ms = self.clock.now_ms();
        let before = self.store.get_kill_switch_status(&scope, now_ms).await?;

        let result = run_attribution(
            self.store.as_ref(),
            self.agent.as_ref(),
            self.uuid_source.as_ref(),
            input,
            now_ms,
        )
        .await?;

        match &result {
            AttributionResult::PatternCreated { pattern_id, occurrence_id } => {
                self.sink.emit(EngineEvent::PatternCreated { pattern_id: *pattern_id });
                self.sink.emit(EngineEvent::OccurrenceCreated { occurrence_id: *occurrence_id });
            }
            AttributionResult::PatternUpdated { occurrence_id, .. } => {
                self.sink.emit(EngineEvent::OccurrenceCreated { occurrence_id: *occurrence_id });
            }
            AttributionResult::ProvisionalAlert { alert_id, promoted_to: Some(pattern_id) } => {
                self.sink.emit(EngineEvent::AlertPromoted {
                    alert_id: *alert_id,
                    pattern_id: *pattern_id,
                });
            }
            AttributionResult::DocUpdateRequested { promoted_to: Some(pattern_id), .. } => {
                self.sink.emit(EngineEvent::PatternCreated { pattern_id: *pattern_id });
            }
            _ => {}
        }

        let after = self.store.get_kill_switch_status(&scope, now_ms).await?;
        if after.state != before.state {
            self.sink.emit(EngineEvent::KillSwitchChanged { new_state: after.state });
        }

        Ok(result)
    }

    /// Reads the scoped store and produces a tiered, ordered warning
    /// bundle for injection at `request.target` (§4.I). Read-only: never
    /// emits events, since selection mutates nothing.
    pub async fn select(&self, request: SelectionRequest) -> Result<InjectionBundle, EngineError> {
        let now_ms = self.clock.now_ms();
        Ok(select_injections(self.store.as_ref(), request, now_ms).await?)
    }

    /// Runs every batch evolution processor once for `scope`: confidence
    /// decay, provisional alert lifecycle, salience detection, and
    /// principle promotion, in that order, emitting `AlertPromoted` and
    /// `SalienceDetected` events for whatever each pass produced. Safe to
    /// call repeatedly — every processor is independently idempotent
    /// (§4.K).
    pub async fn run_evolution(&self, scope: Scope) -> Result<EvolutionReport, EngineError> {
        let now_ms = self.clock.now_ms();

        let archived_pattern_ids = run_confidence_decay(self.store.as_ref(), &scope, now_ms).await?;

        let alerts = run_alert_lifecycle(self.store.as_ref(), &scope, self.uuid_source.as_ref(), now_ms).await?;
        for alert_id in &alerts.promoted {
            let alert = self.store.get_alert(&scope, *alert_id).await?;
            if let Some(pattern_id) = alert.promoted_to_pattern_id {
                self.sink.emit(EngineEvent::AlertPromoted {
                    alert_id: *alert_id,
                    pattern_id,
                });
            }
        }

        let salience_issue_ids =
            run_salience_detection(self.store.as_ref(), &scope, self.uuid_source.as_ref(), now_ms).await?;
        for salience_issue_id in &salience_issue_ids {
            self.sink.emit(EngineEvent::SalienceDetected {
                salience_issue_id: *salience_issue_id,
            });
        }

        let principles =
            run_principle_promotion(self.store.as_ref(), &scope, self.uuid_source.as_ref(), now_ms).await?;

        info!(
            scope = ?scope,
            archived = archived_pattern_ids.len(),
            alerts_promoted = alerts.promoted.len(),
            alerts_expired = alerts.expired.len(),
            salience_issues = salience_issue_ids.len(),
            principles_promoted = principles.promoted.len(),
            "evolution pass complete"
        );

        Ok(EvolutionReport {
            archived_pattern_ids,
            alerts,
            salience_issue_ids,
            principles,
        })
    }
}
