use guidewright_evidence::CarrierQuoteType;
use guidewright_store::AttributionOutcome;

/// Rolling-window attribution-health metrics, recomputed from the last 30
/// days of `AttributionOutcome` rows on every `evaluate_health` call (§4.J).
/// None of this is persisted between evaluations — the window is read fresh
/// each time so a caller can never observe a stale metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthMetrics {
    pub attribution_precision_score: f64,
    pub inferred_ratio: f64,
    pub observed_improvement_rate: f64,
    pub total_outcomes: usize,
}

impl HealthMetrics {
    /// `total == 0` is the convention case for each ratio: precision and
    /// improvement default to a healthy `1.0`, inferred ratio defaults to a
    /// healthy `0.0` — an empty window is never itself a reason to pause.
    pub fn compute(outcomes: &[AttributionOutcome]) -> Self {
        let total = outcomes.len();
        let verbatim = outcomes
            .iter()
            .filter(|o| o.carrier_quote_type == CarrierQuoteType::Verbatim)
            .count();
        let inferred = outcomes
            .iter()
            .filter(|o| o.carrier_quote_type == CarrierQuoteType::Inferred)
            .count();

        let attribution_precision_score = if total == 0 {
            1.0
        } else {
            verbatim as f64 / total as f64
        };
        let inferred_ratio = if total == 0 {
            0.0
        } else {
            inferred as f64 / total as f64
        };

        let without_recurrence = outcomes
            .iter()
            .filter(|o| o.injection_outcome == Some(true))
            .count();
        let with_recurrence = outcomes
            .iter()
            .filter(|o| o.injection_outcome == Some(false))
            .count();
        let denom = without_recurrence + with_recurrence;
        let observed_improvement_rate = if denom == 0 {
            1.0
        } else {
            without_recurrence as f64 / denom as f64
        };

        Self {
            attribution_precision_score,
            inferred_ratio,
            observed_improvement_rate,
            total_outcomes: total,
        }
    }

    /// All three thresholds named by the recovery rule in §4.J: precision
    /// `>= 0.6`, inferred ratio `<= 0.25`, improvement `>= 0.4`.
    pub fn is_healthy(&self) -> bool {
        self.attribution_precision_score >= 0.6
            && self.inferred_ratio <= 0.25
            && self.observed_improvement_rate >= 0.4
    }

    pub fn breaches_precision_floor(&self) -> bool {
        self.attribution_precision_score < 0.4
    }

    pub fn breaches_improvement_floor(&self) -> bool {
        self.observed_improvement_rate < 0.2
    }

    pub fn breaches_inferred_ceiling(&self) -> bool {
        self.inferred_ratio > 0.4
    }
}
