use crate::error::KillSwitchError;
use crate::metrics::HealthMetrics;
use guidewright_evidence::Scope;
use guidewright_store::{KillSwitchState, KillSwitchStatus, Store};
use tracing::info;

const ROLLING_WINDOW_MS: u64 = 30 * 24 * 60 * 60 * 1000;
const INFERRED_PAUSE_COOLDOWN_MS: u64 = 7 * 24 * 60 * 60 * 1000;
const FULL_PAUSE_COOLDOWN_MS: u64 = 14 * 24 * 60 * 60 * 1000;

/// Evaluates rolling-window attribution health against a scope's current
/// kill-switch state and applies at most one transition per call (§4.J).
/// Stateless beyond what `get_kill_switch_status`/`put_kill_switch_status`
/// read and write through the store.
pub struct KillSwitchController;

impl KillSwitchController {
    /// Recomputes `HealthMetrics` over the last 30 days, decides whether
    /// the current state should change, persists the result (if changed),
    /// and returns the up-to-date status either way.
    pub async fn evaluate_health(
        store: &dyn Store,
        scope: &Scope,
        now_ms: u64,
    ) -> Result<KillSwitchStatus, KillSwitchError> {
        let since_ms = now_ms.saturating_sub(ROLLING_WINDOW_MS);
        let outcomes = store.list_outcomes_since(scope, since_ms).await?;
        let metrics = HealthMetrics::compute(&outcomes);
        let current = store.get_kill_switch_status(scope, now_ms).await?;

        let next = Self::decide(current.clone(), &metrics, now_ms);
        if next.state != current.state || next.reason != current.reason {
            info!(
                scope = ?scope,
                from = ?current.state,
                to = ?next.state,
                reason = %next.reason,
                "kill-switch state transition"
            );
            store.put_kill_switch_status(scope, next.clone()).await?;
        }
        Ok(next)
    }

    /// Pure decision function, split out from `evaluate_health` so the
    /// state-machine rules can be exercised without a store. A forced-pause
    /// breach always wins over a recovery check, and `FullyPaused` can only
    /// return to `Active` directly, never straight to `InferredPaused`.
    fn decide(current: KillSwitchStatus, metrics: &HealthMetrics, now_ms: u64) -> KillSwitchStatus {
        let mut status = current;

        if metrics.breaches_precision_floor() || metrics.breaches_improvement_floor() {
            if !status.is_fully_paused() {
                status.transition(
                    KillSwitchState::FullyPaused,
                    format!(
                        "precision={:.2} improvement={:.2} breached forced-pause floor",
                        metrics.attribution_precision_score, metrics.observed_improvement_rate
                    ),
                    now_ms,
                    Some(now_ms + FULL_PAUSE_COOLDOWN_MS),
                );
            }
            return status;
        }

        match status.state {
            KillSwitchState::Active => {
                if metrics.breaches_inferred_ceiling() {
                    status.transition(
                        KillSwitchState::InferredPaused,
                        format!(
                            "inferredRatio={:.2} exceeded 0.4 ceiling while active",
                            metrics.inferred_ratio
                        ),
                        now_ms,
                        Some(now_ms + INFERRED_PAUSE_COOLDOWN_MS),
                    );
                }
            }
            KillSwitchState::InferredPaused => {
                if Self::cooldown_elapsed(status.auto_resume_at_ms, now_ms) && metrics.is_healthy() {
                    status.transition(
                        KillSwitchState::Active,
                        "metrics back in healthy band after inferred pause".to_string(),
                        now_ms,
                        None,
                    );
                }
            }
            KillSwitchState::FullyPaused => {
                if Self::cooldown_elapsed(status.auto_resume_at_ms, now_ms) && metrics.is_healthy() {
                    status.transition(
                        KillSwitchState::Active,
                        "metrics back in healthy band after full pause".to_string(),
                        now_ms,
                        None,
                    );
                }
            }
        }

        status
    }

    fn cooldown_elapsed(auto_resume_at_ms: Option<u64>, now_ms: u64) -> bool {
        match auto_resume_at_ms {
            Some(resume_at) => now_ms >= resume_at,
            None => true,
        }
    }
}
