use guidewright_evidence::Adherence;
use guidewright_store::{OccurrenceStatus, PatternOccurrence};

/// Derived facts about a Pattern's occurrence log: total/active counts,
/// last-active time, how many occurrences were injected, and what share of
/// injected occurrences were actually adhered to. None of this is stored —
/// it is recomputed from the occurrence log every time a caller needs a
/// score (§4.H).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternStats {
    pub total_occurrences: usize,
    pub active_occurrences: usize,
    pub last_active_at_ms: Option<u64>,
    pub injected_occurrences: usize,
    pub adherence_rate: f64,
}

impl PatternStats {
    pub fn from_occurrences(occurrences: &[PatternOccurrence]) -> Self {
        let total_occurrences = occurrences.len();
        let active_occurrences = occurrences
            .iter()
            .filter(|o| matches!(o.status, OccurrenceStatus::Active))
            .count();
        let last_active_at_ms = occurrences.iter().map(|o| o.created_at_ms).max();
        let injected: Vec<&PatternOccurrence> = occurrences.iter().filter(|o| o.was_injected).collect();
        let injected_occurrences = injected.len();
        let adherence_rate = if injected.is_empty() {
            0.0
        } else {
            let adhered = injected
                .iter()
                .filter(|o| matches!(o.was_adhered_to, Adherence::Adhered))
                .count();
            adhered as f64 / injected.len() as f64
        };

        Self {
            total_occurrences,
            active_occurrences,
            last_active_at_ms,
            injected_occurrences,
            adherence_rate,
        }
    }

    pub fn days_since_last_active(&self, now_ms: u64) -> Option<f64> {
        self.last_active_at_ms
            .map(|last| (now_ms.saturating_sub(last)) as f64 / (24.0 * 60.0 * 60.0 * 1000.0))
    }
}
