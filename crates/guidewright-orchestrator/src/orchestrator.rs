use crate::error::OrchestratorError;
use crate::input::AttributionInput;
use crate::result::AttributionResult;
use guidewright_agent::AttributionAgent;
use guidewright_evidence::{
    CarrierQuoteType, ContentHash, DocFingerprint, EvidenceBundle, OccurrenceId, OutcomeId,
    PatternId, Scope, Stage, UuidSource,
};
use guidewright_evolution::run_alert_lifecycle;
use guidewright_killswitch::KillSwitchController;
use guidewright_resolver::{classify_decision_finding, extract_tags, FailureModeResolver, NoncomplianceChecker};
use guidewright_store::{
    AttributionOutcome, DocUpdateRequest, DocUpdateStatus, ExecutionNoncompliance, KillSwitchState,
    Pattern, PatternOccurrence, ProvisionalAlert, SalienceIssue, SalienceStatus, Store,
};
use tracing::info;

const KILL_SWITCH_FULLY_PAUSED_TAG: &str = "[KILL_SWITCH:FULLY_PAUSED]";
const KILL_SWITCH_INFERRED_PAUSED_TAG: &str = "[KILL_SWITCH:INFERRED_PAUSED]";
const DECISION_RECURRENCE_PROMOTION_THRESHOLD: usize = 3;

fn carrier_fingerprint_for(input: &AttributionInput, stage: Stage) -> DocFingerprint {
    match stage {
        Stage::ContextPack => input.context_pack_fingerprint.clone(),
        Stage::Spec => input.spec_fingerprint.clone(),
    }
}

/// Runs the fixed ten-step attribution sequence (§4.G) for one Finding.
/// Every branch ends by recording an `AttributionOutcome` and asking the
/// kill-switch controller to re-evaluate health, so no caller needs to
/// remember to do either itself. Any error — agent failure, a missing or
/// archived scope, a storage error — aborts the remaining steps with no
/// further writes than whatever already committed.
#[allow(clippy::too_many_arguments)]
pub async fn run_attribution(
    store: &dyn Store,
    agent: &dyn AttributionAgent,
    uuid_source: &dyn UuidSource,
    input: AttributionInput,
    now_ms: u64,
) -> Result<AttributionResult, OrchestratorError> {
    let scope = input.scope;

    // Step 1: read current kill-switch state. Noncompliance paths (step 4)
    // run regardless of this value, so the gate itself is applied later.
    let kill_switch = store.get_kill_switch_status(&scope, now_ms).await?;

    // Step 2: external Attribution Agent call. A failure here aborts with
    // no side effects — nothing has been written yet.
    let evidence = agent
        .attribute(&input.finding, &input.context_pack_content, &input.spec_content)
        .await?;

    // Step 3.
    let (failure_mode, reasoning) = FailureModeResolver::resolve(&evidence);

    // Step 4.
    let (is_noncompliance, draft) = NoncomplianceChecker::check(&input.finding, &evidence);
    if is_noncompliance {
        let draft = draft.expect("NoncomplianceChecker returns a draft whenever isNoncompliance is true");
        let noncompliance_id = guidewright_evidence::NoncomplianceId::new(uuid_source.next_uuid());
        let record = ExecutionNoncompliance {
            id: noncompliance_id,
            finding_id: draft.finding_id,
            possible_causes: draft.possible_causes,
            detail: draft.detail.clone(),
            created_at_ms: now_ms,
        };
        store.put_noncompliance(&scope, record).await?;

        upsert_salience_issue(store, &input, &evidence, uuid_source, now_ms).await?;

        record_outcome(
            store,
            &scope,
            uuid_source,
            input.finding.id,
            evidence.carrier_quote_type,
            false,
            format!("noncompliance: {}", draft.detail),
            now_ms,
        )
        .await?;
        KillSwitchController::evaluate_health(store, &scope, now_ms).await?;

        return Ok(AttributionResult::Noncompliance { noncompliance_id });
    }

    // Step 5: kill-switch gate.
    let gated_reason = match kill_switch.state {
        KillSwitchState::FullyPaused => Some(KILL_SWITCH_FULLY_PAUSED_TAG),
        KillSwitchState::InferredPaused if evidence.carrier_quote_type == CarrierQuoteType::Inferred => {
            Some(KILL_SWITCH_INFERRED_PAUSED_TAG)
        }
        _ => None,
    };
    if let Some(tag) = gated_reason {
        let decorated = format!("{tag} {reasoning}");
        record_outcome(
            store,
            &scope,
            uuid_source,
            input.finding.id,
            evidence.carrier_quote_type,
            false,
            decorated.clone(),
            now_ms,
        )
        .await?;
        KillSwitchController::evaluate_health(store, &scope, now_ms).await?;
        return Ok(AttributionResult::SkippedByKillSwitch { reason: decorated });
    }

    // Step 6: decisions findings always get a DocUpdateRequest, regardless
    // of whether they end up promoted to a Pattern.
    if input.finding.scout_type == guidewright_evidence::ScoutType::Decisions {
        let decision_class = classify_decision_finding(&input.finding);
        let request_id = guidewright_evidence::DocUpdateRequestId::new(uuid_source.next_uuid());
        let request = DocUpdateRequest {
            id: request_id,
            finding_id: input.finding.id,
            decision_class,
            carrier_stage: evidence.carrier_stage,
            proposed_change: evidence.carrier_quote.clone(),
            status: DocUpdateStatus::Pending,
            created_at_ms: now_ms,
        };
        store.put_doc_update_request(&scope, request).await?;

        let recurrence = store
            .list_doc_update_requests(&scope)
            .await?
            .into_iter()
            .filter(|r| r.decision_class == decision_class)
            .count();

        let promote = input.finding.severity.is_high_or_critical()
            || recurrence >= DECISION_RECURRENCE_PROMOTION_THRESHOLD;

        if promote {
            let (pattern_id, _occurrence_id) =
                upsert_pattern_and_occurrence(store, uuid_source, &input, &evidence, failure_mode, now_ms).await?;
            record_outcome(
                store,
                &scope,
                uuid_source,
                input.finding.id,
                evidence.carrier_quote_type,
                true,
                reasoning,
                now_ms,
            )
            .await?;
            KillSwitchController::evaluate_health(store, &scope, now_ms).await?;
            return Ok(AttributionResult::DocUpdateRequested {
                request_id,
                promoted_to: Some(pattern_id),
            });
        }

        record_outcome(
            store,
            &scope,
            uuid_source,
            input.finding.id,
            evidence.carrier_quote_type,
            false,
            reasoning,
            now_ms,
        )
        .await?;
        KillSwitchController::evaluate_health(store, &scope, now_ms).await?;
        return Ok(AttributionResult::DocUpdateRequested {
            request_id,
            promoted_to: None,
        });
    }

    // Step 7: provisional alert eligibility.
    let alert_eligible = input.finding.severity.is_high_or_critical()
        && input.finding.scout_type.is_alert_eligible()
        && evidence.carrier_quote_type == CarrierQuoteType::Inferred;
    if alert_eligible {
        let key = Pattern::compute_key(evidence.carrier_stage, &evidence.carrier_quote, input.finding.scout_type);
        let existing = store
            .list_alerts_with_status(&scope, guidewright_store::AlertStatus::Active)
            .await?
            .into_iter()
            .find(|a| Pattern::compute_key(a.carrier_stage, &a.pattern_content, a.finding_category) == key);

        let (alert_id, just_crossed_gate) = match existing {
            Some(mut alert) => {
                alert.add_occurrence(input.finding.id, input.finding.issue_id.clone());
                let crossed = alert.meets_promotion_gate();
                let id = alert.id;
                store.update_alert(&scope, id, alert).await?;
                (id, crossed)
            }
            None => {
                let id = guidewright_evidence::AlertId::new(uuid_source.next_uuid());
                let tags = extract_tags(&format!(
                    "{} {} {}",
                    input.finding.title, input.finding.description, input.finding.evidence
                ));
                let alert = ProvisionalAlert::new(
                    id,
                    input.finding.id,
                    input.finding.issue_id.clone(),
                    guidewright_evidence::InjectionTarget::Both,
                    tags,
                    evidence.carrier_stage,
                    input.finding.scout_type,
                    failure_mode,
                    input.finding.severity,
                    evidence.carrier_quote.clone(),
                    now_ms,
                );
                store.put_alert(&scope, alert).await?;
                (id, false)
            }
        };

        let promoted_to = if just_crossed_gate {
            let report = run_alert_lifecycle(store, &scope, uuid_source, now_ms).await?;
            if report.promoted.contains(&alert_id) {
                let promoted = store.get_alert(&scope, alert_id).await?;
                promoted.promoted_to_pattern_id
            } else {
                None
            }
        } else {
            None
        };

        record_outcome(
            store,
            &scope,
            uuid_source,
            input.finding.id,
            evidence.carrier_quote_type,
            promoted_to.is_some(),
            reasoning,
            now_ms,
        )
        .await?;
        KillSwitchController::evaluate_health(store, &scope, now_ms).await?;
        return Ok(AttributionResult::ProvisionalAlert {
            alert_id,
            promoted_to,
        });
    }

    // Step 8 + 9: direct Pattern upsert with its Occurrence.
    let (pattern_id, occurrence_id, pattern_existed) =
        upsert_pattern_and_occurrence_reporting(store, uuid_source, &input, &evidence, failure_mode, now_ms).await?;

    // Step 10.
    record_outcome(
        store,
        &scope,
        uuid_source,
        input.finding.id,
        evidence.carrier_quote_type,
        true,
        reasoning,
        now_ms,
    )
    .await?;
    KillSwitchController::evaluate_health(store, &scope, now_ms).await?;

    Ok(if pattern_existed {
        AttributionResult::PatternUpdated {
            pattern_id,
            occurrence_id,
        }
    } else {
        AttributionResult::PatternCreated {
            pattern_id,
            occurrence_id,
        }
    })
}

/// Step 8 (upsert) + step 9 (occurrence append), shared by the direct
/// Pattern path and the decisions-promotion path. Returns only the ids;
/// callers that need to distinguish creation from update go through
/// [`upsert_pattern_and_occurrence_reporting`] instead.
async fn upsert_pattern_and_occurrence(
    store: &dyn Store,
    uuid_source: &dyn UuidSource,
    input: &AttributionInput,
    evidence: &EvidenceBundle,
    failure_mode: guidewright_evidence::FailureMode,
    now_ms: u64,
) -> Result<(PatternId, OccurrenceId), OrchestratorError> {
    let (pattern_id, occurrence_id, _) =
        upsert_pattern_and_occurrence_reporting(store, uuid_source, input, evidence, failure_mode, now_ms).await?;
    Ok((pattern_id, occurrence_id))
}

async fn upsert_pattern_and_occurrence_reporting(
    store: &dyn Store,
    uuid_source: &dyn UuidSource,
    input: &AttributionInput,
    evidence: &EvidenceBundle,
    failure_mode: guidewright_evidence::FailureMode,
    now_ms: u64,
) -> Result<(PatternId, OccurrenceId, bool), OrchestratorError> {
    let scope = input.scope;
    let key = Pattern::compute_key(evidence.carrier_stage, &evidence.carrier_quote, input.finding.scout_type);

    let (pattern_id, existed) = match store.find_active_pattern_by_key(&scope, key).await? {
        Some(mut existing) => {
            existing.record_occurrence(input.finding.severity, evidence.carrier_quote_type, now_ms);
            let id = existing.id;
            store.put_pattern(existing).await?;
            (id, true)
        }
        None => {
            let tags = extract_tags(&format!(
                "{} {} {}",
                input.finding.title, input.finding.description, input.finding.evidence
            ));
            let id = PatternId::new(uuid_source.next_uuid());
            let pattern = Pattern::new(
                id,
                scope,
                evidence.carrier_quote.clone(),
                evidence.carrier_stage,
                input.finding.scout_type,
                failure_mode,
                input.finding.severity,
                evidence.carrier_quote_type,
                tags,
                false,
                now_ms,
            );
            store.put_pattern(pattern).await?;
            (id, false)
        }
    };

    let carrier_fingerprint = carrier_fingerprint_for(input, evidence.carrier_stage);
    let origin_fingerprint = if evidence.has_citation && evidence.source_retrievable {
        input.origin_fingerprint.clone()
    } else {
        None
    };
    let mut provenance_chain = vec![carrier_fingerprint.clone()];
    if let Some(origin) = &origin_fingerprint {
        provenance_chain.push(origin.clone());
    }
    let origin_excerpt_hash = origin_fingerprint
        .as_ref()
        .map(|_| ContentHash::hash(evidence.carrier_quote.as_bytes()));

    let occurrence_id = OccurrenceId::new(uuid_source.next_uuid());
    let occurrence = PatternOccurrence::new(
        occurrence_id,
        pattern_id,
        input.finding.id,
        evidence.clone(),
        carrier_fingerprint,
        origin_fingerprint,
        provenance_chain,
        origin_excerpt_hash,
        input.finding.severity,
        now_ms,
    );
    store.put_occurrence(&scope, occurrence).await?;

    Ok((pattern_id, occurrence_id, existed))
}

/// Upserts a `SalienceIssue` for the carrier location named by `evidence`
/// (§4.G step 4's noncompliance branch), sharing the exact location-hash
/// and upsert rule the batch salience-detection job uses (§4.K): a
/// resolved issue is never reopened.
async fn upsert_salience_issue(
    store: &dyn Store,
    input: &AttributionInput,
    evidence: &EvidenceBundle,
    uuid_source: &dyn UuidSource,
    now_ms: u64,
) -> Result<(), OrchestratorError> {
    let scope = &input.scope;
    let location = carrier_fingerprint_for(input, evidence.carrier_stage).identity_key();
    let hash = SalienceIssue::compute_location_hash(evidence.carrier_stage, &location, &evidence.carrier_quote);

    match store.find_salience_issue_by_location_hash(scope, hash).await? {
        Some(mut existing) if existing.status != SalienceStatus::Resolved => {
            existing.record_ignore(now_ms);
            let id = existing.id;
            store.update_salience_issue(scope, id, existing).await?;
        }
        Some(_) => {
            // Resolved — never reopened.
        }
        None => {
            let id = guidewright_evidence::SalienceIssueId::new(uuid_source.next_uuid());
            let issue = SalienceIssue::new(id, evidence.carrier_stage, location, &evidence.carrier_quote, now_ms);
            store.put_salience_issue(scope, issue).await?;
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn record_outcome(
    store: &dyn Store,
    scope: &Scope,
    uuid_source: &dyn UuidSource,
    finding_id: guidewright_evidence::FindingId,
    carrier_quote_type: CarrierQuoteType,
    pattern_created: bool,
    reasoning: String,
    now_ms: u64,
) -> Result<(), OrchestratorError> {
    let id = OutcomeId::new(uuid_source.next_uuid());
    let outcome = AttributionOutcome {
        id,
        finding_id,
        carrier_quote_type,
        pattern_created,
        injection_outcome: None,
        reasoning,
        created_at_ms: now_ms,
    };
    store.put_outcome(scope, outcome).await?;
    info!(scope = ?scope, finding_id = ?finding_id, pattern_created, "attribution outcome recorded");
    Ok(())
}
