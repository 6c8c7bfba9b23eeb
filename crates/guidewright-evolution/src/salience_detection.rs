use crate::error::EvolutionError;
use guidewright_evidence::{Adherence, SalienceIssueId, Scope, Stage, UuidSource};
use guidewright_store::{SalienceIssue, SalienceStatus, Sha256Key, Store};
use std::collections::HashMap;

/// Rolling window the detector scans for recurring violations (§4.K).
pub const SALIENCE_WINDOW_MS: u64 = 30 * 24 * 60 * 60 * 1000;
/// Minimum violated-and-injected occurrences at the same carrier location
/// before it is worth flagging as salience-damaged guidance.
pub const SALIENCE_THRESHOLD: usize = 3;

struct LocationHit {
    stage: Stage,
    location: String,
    excerpt: String,
    created_at_ms: u64,
}

/// Scans the last 30 days of injected occurrences for carrier locations
/// whose guidance was repeatedly injected yet repeatedly violated, and
/// upserts a `SalienceIssue` per location that crosses [`SALIENCE_THRESHOLD`].
/// A location already marked `Resolved` is never reopened (§4.K) — it is
/// silently skipped even if the violations keep recurring. Returns the ids
/// of issues created or updated this run.
pub async fn run_salience_detection(
    store: &dyn Store,
    scope: &Scope,
    uuid_source: &dyn UuidSource,
    now_ms: u64,
) -> Result<Vec<SalienceIssueId>, EvolutionError> {
    let since_ms = now_ms.saturating_sub(SALIENCE_WINDOW_MS);
    let occurrences = store.list_occurrences_since(scope, since_ms).await?;

    let mut groups: HashMap<Sha256Key, Vec<LocationHit>> = HashMap::new();
    for occurrence in &occurrences {
        if !occurrence.was_injected || occurrence.was_adhered_to != Adherence::Violated {
            continue;
        }
        let stage = occurrence.evidence.carrier_stage;
        let location = occurrence.carrier_fingerprint.identity_key();
        let excerpt = occurrence.evidence.carrier_quote.clone();
        let hash = SalienceIssue::compute_location_hash(stage, &location, &excerpt);
        groups.entry(hash).or_default().push(LocationHit {
            stage,
            location,
            excerpt,
            created_at_ms: occurrence.created_at_ms,
        });
    }

    let mut touched = Vec::new();
    for (hash, hits) in groups {
        if hits.len() < SALIENCE_THRESHOLD {
            continue;
        }

        let first_ms = hits.iter().map(|h| h.created_at_ms).min().unwrap_or(now_ms);
        let last_ms = hits.iter().map(|h| h.created_at_ms).max().unwrap_or(now_ms);
        let count = hits.len() as u32;

        match store.find_salience_issue_by_location_hash(scope, hash).await? {
            Some(existing) if existing.status == SalienceStatus::Resolved => continue,
            Some(mut existing) => {
                existing.occurrence_count = existing.occurrence_count.max(count);
                existing.last_detected_at_ms = existing.last_detected_at_ms.max(last_ms);
                let id = existing.id;
                store.update_salience_issue(scope, id, existing).await?;
                touched.push(id);
            }
            None => {
                let first = &hits[0];
                let id = SalienceIssueId::new(uuid_source.next_uuid());
                let mut issue = SalienceIssue::new(id, first.stage, first.location.clone(), &first.excerpt, first_ms);
                issue.occurrence_count = count;
                issue.last_detected_at_ms = last_ms;
                store.put_salience_issue(scope, issue).await?;
                touched.push(id);
            }
        }
    }

    Ok(touched)
}
