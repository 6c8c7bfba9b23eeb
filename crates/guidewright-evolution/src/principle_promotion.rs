use crate::error::EvolutionError;
use guidewright_evidence::{FailureMode, InjectionTarget, PrincipleId, Scope, ScoutType, Tags, UuidSource};
use guidewright_store::{DerivedPrinciple, Pattern, Store};
use std::collections::BTreeMap;

/// Minimum number of aligned active patterns before a group is worth
/// promoting into a standing `DerivedPrinciple` (§3 / §4.K). Mirrors the
/// recurrence threshold the orchestrator uses elsewhere for "this keeps
/// happening".
pub const PRINCIPLE_PROMOTION_MIN_PATTERNS: usize = 3;

/// Report of one `run_principle_promotion` pass: principles newly created
/// and groups that already had a principle for their exact pattern set
/// (promotion is idempotent, so re-running changes nothing for those).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrinciplePromotionReport {
    pub promoted: Vec<PrincipleId>,
    pub already_promoted: usize,
}

/// Two patterns are "aligned" for promotion purposes if they share a
/// `(findingCategory, failureMode)` pair — the same kind of guidance
/// failing in the same way, regardless of which project surfaced it.
type AlignmentKey = (ScoutType, FailureMode);

fn alignment_key(pattern: &Pattern) -> AlignmentKey {
    (pattern.finding_category, pattern.failure_mode)
}

/// Groups active patterns by [`alignment_key`] and promotes every group
/// that reaches [`PRINCIPLE_PROMOTION_MIN_PATTERNS`] and shares at least
/// one common `touches` tag into a workspace-scoped `DerivedPrinciple`.
/// Patterns are drawn from `scope`'s project plus every other project in
/// the same workspace, since a principle is a workspace-level standing
/// piece of guidance, not a per-project one (§3). Promotion is idempotent:
/// a group whose frozen `promotion_key` already has a principle is counted
/// in `already_promoted` and left untouched, satisfying §9 Open Question
/// (b).
pub async fn run_principle_promotion(
    store: &dyn Store,
    scope: &Scope,
    uuid_source: &dyn UuidSource,
    now_ms: u64,
) -> Result<PrinciplePromotionReport, EvolutionError> {
    let mut patterns = store.list_active_patterns(scope).await?;
    patterns.extend(
        store
            .list_active_patterns_in_workspace_excluding(scope.workspace_id, scope.project_id)
            .await?,
    );

    let mut groups: BTreeMap<AlignmentKey, Vec<Pattern>> = BTreeMap::new();
    for pattern in patterns {
        groups.entry(alignment_key(&pattern)).or_default().push(pattern);
    }

    let mut report = PrinciplePromotionReport::default();

    for ((finding_category, failure_mode), group) in groups {
        if group.len() < PRINCIPLE_PROMOTION_MIN_PATTERNS {
            continue;
        }

        let shared_touches = group
            .iter()
            .map(|p| p.tags.touches.clone())
            .reduce(|acc, touches| acc.intersection(&touches).cloned().collect())
            .unwrap_or_default();
        if shared_touches.is_empty() {
            continue;
        }

        let mut source_pattern_ids: Vec<_> = group.iter().map(|p| p.id).collect();
        source_pattern_ids.sort();
        let promotion_key = DerivedPrinciple::compute_promotion_key(&source_pattern_ids);

        if store
            .find_principle_by_promotion_key(scope.workspace_id, promotion_key)
            .await?
            .is_some()
        {
            report.already_promoted += 1;
            continue;
        }

        let touches = shared_touches.iter().cloned().collect::<Vec<_>>().join(", ");
        let statement = format!(
            "{} patterns across {} finding(s) touching {} recur with failure mode '{}': treat as a standing principle rather than a per-pattern warning.",
            group.len(),
            finding_category,
            touches,
            failure_mode,
        );

        let tags = Tags::new(
            shared_touches,
            group.iter().flat_map(|p| p.tags.technologies.clone()).collect::<Vec<_>>(),
            group.iter().flat_map(|p| p.tags.task_types.clone()).collect::<Vec<_>>(),
        );

        let principle = DerivedPrinciple::promote(
            PrincipleId::new(uuid_source.next_uuid()),
            scope.workspace_id,
            statement,
            InjectionTarget::Both,
            source_pattern_ids,
            tags,
            now_ms,
        );
        let id = principle.id;
        store.put_principle(scope.workspace_id, principle).await?;
        report.promoted.push(id);
    }

    Ok(report)
}
