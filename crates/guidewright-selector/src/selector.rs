use crate::category::infer_category;
use crate::error::SelectorError;
use crate::request::SelectionRequest;
use crate::types::{InjectionBundle, SelectedWarning, WarningSource};
use guidewright_evidence::{CarrierQuoteType, FailureMode, ScoutType, Severity, Tags};
use guidewright_scoring::{injection_priority, PatternStats, ScoringInputs};
use guidewright_store::{AlertStatus, DerivedPrinciple, Pattern, PatternKey, Store};
use std::collections::HashSet;

struct ScoredPattern {
    pattern: Pattern,
    stats: PatternStats,
    priority: f64,
    is_cross_project: bool,
}

fn passes_inferred_gate(pattern: &Pattern, active_occurrences: usize, baseline_overlap: bool) -> bool {
    if pattern.primary_carrier_quote_type() != CarrierQuoteType::Inferred {
        return true;
    }
    active_occurrences >= 2
        || (pattern.severity_max().is_high_or_critical() && baseline_overlap)
        || pattern.failure_mode == FailureMode::MissingReference
}

async fn score_patterns(
    store: &dyn Store,
    patterns: Vec<Pattern>,
    task_tags: &Tags,
    now_ms: u64,
    is_cross_project: bool,
) -> Result<Vec<ScoredPattern>, SelectorError> {
    let mut scored = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let occurrences = store.list_occurrences(&pattern.scope, pattern.id).await?;
        let stats = PatternStats::from_occurrences(&occurrences);
        let priority = injection_priority(
            &pattern,
            &stats,
            now_ms,
            ScoringInputs {
                touch_overlaps: pattern.tags.touch_overlap_count(task_tags),
                tech_overlaps: pattern.tags.technology_overlap_count(task_tags),
                is_cross_project,
                suspected_synthesis_drift: false,
            },
        );
        scored.push(ScoredPattern { pattern, stats, priority, is_cross_project });
    }
    Ok(scored)
}

fn sort_key_days(scored: &ScoredPattern, now_ms: u64) -> f64 {
    scored.stats.days_since_last_active(now_ms).unwrap_or(f64::INFINITY)
}

fn sort_security_tier(patterns: &mut [ScoredPattern], now_ms: u64) {
    patterns.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap()
            .then(b.pattern.severity_max().cmp(&a.pattern.severity_max()))
            .then(sort_key_days(a, now_ms).partial_cmp(&sort_key_days(b, now_ms)).unwrap())
            .then(a.pattern.id.cmp(&b.pattern.id))
    });
}

fn pattern_to_warning(scored: &ScoredPattern, priority_override: Option<f64>) -> SelectedWarning {
    SelectedWarning {
        source: WarningSource::Pattern(scored.pattern.id),
        text: scored.pattern.pattern_content().to_string(),
        category: infer_category(&scored.pattern),
        priority: priority_override.unwrap_or(scored.priority),
        conflict_key: None,
    }
}

/// Run the eight-stage tiered injection selector against the scoped store
/// and return an ordered warning bundle (§4.I). Stages only append; once a
/// pattern is selected it is never reordered by a later stage. Returns an
/// empty bundle if the project is not active.
pub async fn select_injections(
    store: &dyn Store,
    request: SelectionRequest,
    now_ms: u64,
) -> Result<InjectionBundle, SelectorError> {
    let task_tags = request.task_profile.tags.clone();
    let target = request.target;
    let scope = request.scope;

    match store.is_scope_archived(&scope).await {
        Ok(true) => return Ok(InjectionBundle::default()),
        Ok(false) => {}
        Err(_) => return Ok(InjectionBundle::default()),
    }

    let mut bundle = InjectionBundle::default();
    let principles = store.list_principles(scope.workspace_id).await?;

    // Stage 1: baseline principles.
    let mut baseline: Vec<&DerivedPrinciple> = principles
        .iter()
        .filter(|p| p.is_baseline())
        .filter(|p| p.inject_into.matches(target))
        .filter(|p| p.tags.touch_overlap_count(&task_tags) > 0)
        .collect();
    baseline.sort_by(|a, b| {
        b.tags
            .touch_overlap_count(&task_tags)
            .cmp(&a.tags.touch_overlap_count(&task_tags))
            .then(a.id.cmp(&b.id))
    });
    let baseline_take = if request.task_profile.is_low_confidence() { 2 } else { 1 };
    baseline.truncate(baseline_take);
    for p in &baseline {
        bundle.warnings.push(SelectedWarning {
            source: WarningSource::BaselinePrinciple(p.id),
            text: p.statement.clone(),
            category: crate::types::WarningCategory::Other,
            priority: 1.0,
            conflict_key: None,
        });
    }

    // Stage 2: derived principles.
    let mut derived: Vec<&DerivedPrinciple> = principles
        .iter()
        .filter(|p| !p.is_baseline())
        .filter(|p| p.inject_into.matches(target))
        .filter(|p| p.tags.touch_overlap_count(&task_tags) > 0)
        .collect();
    derived.sort_by(|a, b| {
        b.tags
            .touch_overlap_count(&task_tags)
            .cmp(&a.tags.touch_overlap_count(&task_tags))
            .then(b.updated_at_ms.cmp(&a.updated_at_ms))
            .then(a.id.cmp(&b.id))
    });
    derived.truncate(1);
    for p in &derived {
        bundle.warnings.push(SelectedWarning {
            source: WarningSource::DerivedPrinciple(p.id),
            text: p.statement.clone(),
            category: crate::types::WarningCategory::Other,
            priority: 0.95,
            conflict_key: None,
        });
    }

    let baseline_principles: Vec<&DerivedPrinciple> =
        principles.iter().filter(|p| p.is_baseline()).collect();

    // Stage 3: project patterns.
    let mut occurrence_cache = std::collections::HashMap::new();
    let candidate_project_patterns: Vec<Pattern> = store
        .list_active_patterns(&scope)
        .await?
        .into_iter()
        .filter(|p| p.carrier_stage == target)
        .filter(|p| p.tags.has_any_overlap(&task_tags))
        .collect();

    let mut project_patterns = Vec::new();
    for pattern in candidate_project_patterns {
        let occurrences = store.list_occurrences(&scope, pattern.id).await?;
        let stats = PatternStats::from_occurrences(&occurrences);
        let baseline_overlap = baseline_principles
            .iter()
            .any(|bp| bp.tags.has_any_overlap(&pattern.tags));
        if passes_inferred_gate(&pattern, stats.active_occurrences, baseline_overlap) {
            occurrence_cache.insert(pattern.id, stats);
            project_patterns.push(pattern);
        }
    }

    let local_keys: HashSet<PatternKey> = project_patterns.iter().map(|p| p.pattern_key).collect();

    // Stage 4: cross-project patterns, opt-in only.
    let cross_patterns: Vec<Pattern> = if request.cross_project_opt_in {
        store
            .list_active_patterns_in_workspace_excluding(scope.workspace_id, scope.project_id)
            .await?
            .into_iter()
            .filter(|p| p.severity_max() >= Severity::High)
            .filter(|p| p.finding_category == ScoutType::Security)
            .filter(|p| !local_keys.contains(&p.pattern_key))
            .filter(|p| {
                let touch = p.tags.touch_overlap_count(&task_tags);
                let tech = p.tags.technology_overlap_count(&task_tags);
                touch >= 2 || (touch >= 1 && tech >= 1)
            })
            .collect()
    } else {
        vec![]
    };

    let mut scored_project = score_patterns(store, project_patterns, &task_tags, now_ms, false).await?;
    let mut scored_cross = score_patterns(store, cross_patterns, &task_tags, now_ms, true).await?;

    let (mut security, mut non_security): (Vec<ScoredPattern>, Vec<ScoredPattern>) =
        scored_project.drain(..).chain(scored_cross.drain(..)).partition(|sp| {
            matches!(sp.pattern.finding_category, ScoutType::Security)
        });

    // Stage 5: security first, up to 3.
    sort_security_tier(&mut security, now_ms);
    security.truncate(3);

    let mut selected_pattern_ids = HashSet::new();
    for sp in &security {
        if bundle.warnings.len() >= request.max_warnings {
            break;
        }
        bundle.warnings.push(pattern_to_warning(sp, None));
        selected_pattern_ids.insert(sp.pattern.id);
    }

    // Stage 6: fill remaining with non-security patterns, same sort key.
    sort_security_tier(&mut non_security, now_ms);
    for sp in &non_security {
        if bundle.warnings.len() >= request.max_warnings {
            break;
        }
        bundle.warnings.push(pattern_to_warning(sp, None));
        selected_pattern_ids.insert(sp.pattern.id);
    }

    // Stage 7: low-confidence fallback.
    if request.task_profile.is_low_confidence() && bundle.warnings.len() < request.max_warnings {
        let mut fallback: Vec<&ScoredPattern> = security
            .iter()
            .chain(non_security.iter())
            .filter(|sp| !selected_pattern_ids.contains(&sp.pattern.id))
            .filter(|sp| sp.pattern.severity_max().is_high_or_critical())
            .collect();
        fallback.sort_by(|a, b| {
            b.priority
                .partial_cmp(&a.priority)
                .unwrap()
                .then(a.pattern.id.cmp(&b.pattern.id))
        });
        for sp in fallback.into_iter().take(2) {
            if bundle.warnings.len() >= request.max_warnings {
                break;
            }
            bundle.warnings.push(pattern_to_warning(sp, Some(sp.priority * 0.8)));
        }
    }

    // Stage 8: provisional alerts, additive and uncapped.
    let mut alerts = store.list_alerts_with_status(&scope, AlertStatus::Active).await?;
    alerts.retain(|a| {
        !a.is_expired(now_ms) && a.inject_into.matches(target) && a.tags.touch_overlap_count(&task_tags) > 0
    });
    alerts.sort_by(|a, b| b.created_at_ms.cmp(&a.created_at_ms));
    for alert in alerts {
        bundle.alerts.push(SelectedWarning {
            source: WarningSource::ProvisionalAlert(alert.id),
            text: format!("provisional: finding {} not yet confirmed as a pattern", alert.finding_id),
            category: crate::types::WarningCategory::Other,
            priority: 0.9,
            conflict_key: None,
        });
    }

    Ok(bundle)
}
