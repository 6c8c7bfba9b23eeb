use crate::error::EvolutionError;
use guidewright_evidence::{PatternId, Scope};
use guidewright_scoring::{attribution_confidence, PatternStats};
use guidewright_store::Store;

/// Below this, a non-permanent pattern is considered stale enough that it
/// should stop being injected (§4.H decay). Permanent patterns never decay
/// and are skipped entirely. Set above the 0.25 floor an `Inferred`-quote
/// pattern settles at once fully decayed (base 0.40 minus the 0.15 decay
/// cap), so a fully-decayed inferred pattern is reachable while a verbatim
/// one (floor 0.60) never is.
pub const DECAY_ARCHIVE_THRESHOLD: f64 = 0.3;

/// Recomputes `attributionConfidence` for every active, non-permanent
/// pattern in `scope` and archives any that have decayed below
/// [`DECAY_ARCHIVE_THRESHOLD`]. Returns the ids of patterns archived this
/// run. Idempotent: re-running against an unchanged occurrence log archives
/// nothing new.
pub async fn run_confidence_decay(
    store: &dyn Store,
    scope: &Scope,
    now_ms: u64,
) -> Result<Vec<PatternId>, EvolutionError> {
    let mut archived = Vec::new();

    for pattern in store.list_active_patterns(scope).await? {
        if pattern.permanent {
            continue;
        }

        let occurrences = store.list_occurrences(scope, pattern.id).await?;
        let stats = PatternStats::from_occurrences(&occurrences);
        let confidence = attribution_confidence(&pattern, &stats, now_ms, false);

        if confidence < DECAY_ARCHIVE_THRESHOLD {
            let id = pattern.id;
            let mut pattern = pattern;
            pattern.archive();
            store.put_pattern(pattern).await?;
            archived.push(id);
        }
    }

    Ok(archived)
}
