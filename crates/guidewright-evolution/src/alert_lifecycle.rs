use crate::error::EvolutionError;
use guidewright_evidence::{AlertId, CarrierQuoteType, PatternId, Scope, UuidSource};
use guidewright_store::{AlertStatus, Pattern, Store};

/// Outcome of one `run_alert_lifecycle` pass: which alerts crossed the
/// promotion gate into a `Pattern` and which expired untouched (§4.K).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertLifecycleReport {
    pub promoted: Vec<AlertId>,
    pub expired: Vec<AlertId>,
}

/// Re-evaluates every `Active` provisional alert in `scope`: alerts that
/// meet the promotion gate become (or are folded into) a `Pattern`, and
/// alerts that have outlived their 14-day window without ever meeting the
/// gate expire untouched. The same gate check runs here whether this is
/// called synchronously right after a new occurrence was recorded against
/// an alert, or periodically as a batch sweep — both are "recompute the
/// gate, promote or expire" over the same alert set.
pub async fn run_alert_lifecycle(
    store: &dyn Store,
    scope: &Scope,
    uuid_source: &dyn UuidSource,
    now_ms: u64,
) -> Result<AlertLifecycleReport, EvolutionError> {
    let mut report = AlertLifecycleReport::default();

    for mut alert in store.list_alerts_with_status(scope, AlertStatus::Active).await? {
        if alert.meets_promotion_gate() {
            let key = Pattern::compute_key(alert.carrier_stage, &alert.pattern_content, alert.finding_category);
            let pattern_id = match store.find_active_pattern_by_key(scope, key).await? {
                Some(mut existing) => {
                    existing.record_occurrence(alert.severity_max, CarrierQuoteType::Inferred, now_ms);
                    let id = existing.id;
                    store.put_pattern(existing).await?;
                    id
                }
                None => {
                    let id = PatternId::new(uuid_source.next_uuid());
                    let pattern = Pattern::new(
                        id,
                        *scope,
                        alert.pattern_content.clone(),
                        alert.carrier_stage,
                        alert.finding_category,
                        alert.failure_mode,
                        alert.severity_max,
                        CarrierQuoteType::Inferred,
                        alert.tags.clone(),
                        false,
                        now_ms,
                    );
                    store.put_pattern(pattern).await?;
                    id
                }
            };

            let id = alert.id;
            alert.promote(pattern_id);
            store.update_alert(scope, id, alert).await?;
            report.promoted.push(id);
        } else if alert.is_expired(now_ms) {
            let id = alert.id;
            alert.expire();
            store.update_alert(scope, id, alert).await?;
            report.expired.push(id);
        }
    }

    Ok(report)
}
