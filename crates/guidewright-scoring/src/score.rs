use crate::pattern_stats::PatternStats;
use guidewright_evidence::{CarrierQuoteType, Severity};
use guidewright_store::Pattern;

const OCCURRENCE_BOOST_STEP: f64 = 0.05;
const OCCURRENCE_BOOST_CAP: f64 = 0.25;
const DECAY_WINDOW_DAYS: f64 = 90.0;
const DECAY_MAX_PENALTY: f64 = 0.15;
const SYNTHESIS_DRIFT_PENALTY: f64 = 0.15;

fn evidence_quality_base(quote_type: CarrierQuoteType) -> f64 {
    match quote_type {
        CarrierQuoteType::Verbatim => 0.75,
        CarrierQuoteType::Paraphrase => 0.55,
        CarrierQuoteType::Inferred => 0.40,
    }
}

/// `attributionConfidence = clamp(base + boost - decay + modifiers, 0, 1)`
/// (§4.H). `permanent` patterns never accrue a decay penalty.
pub fn attribution_confidence(
    pattern: &Pattern,
    stats: &PatternStats,
    now_ms: u64,
    suspected_synthesis_drift: bool,
) -> f64 {
    let base = evidence_quality_base(pattern.primary_carrier_quote_type());

    let boost = (stats.active_occurrences.saturating_sub(1).min(5)) as f64 * OCCURRENCE_BOOST_STEP;
    let boost = boost.min(OCCURRENCE_BOOST_CAP);

    let decay = if pattern.permanent {
        0.0
    } else {
        let days = stats.days_since_last_active(now_ms).unwrap_or(0.0);
        (days / DECAY_WINDOW_DAYS).min(1.0) * DECAY_MAX_PENALTY
    };

    let modifiers = if suspected_synthesis_drift { -SYNTHESIS_DRIFT_PENALTY } else { 0.0 };

    (base + boost - decay + modifiers).clamp(0.0, 1.0)
}

fn relevance_weight(touch_overlaps: usize, tech_overlaps: usize) -> f64 {
    (1.0 + 0.15 * touch_overlaps as f64 + 0.05 * tech_overlaps as f64).min(1.5)
}

fn recency_weight(days_since_last_active: Option<f64>) -> f64 {
    match days_since_last_active {
        None => 0.8,
        Some(days) if days <= 7.0 => 1.0,
        Some(days) if days <= 30.0 => 0.95,
        Some(days) if days <= 90.0 => 0.9,
        Some(_) => 0.8,
    }
}

/// Inputs to `injection_priority` beyond the pattern and its stats: overlap
/// counts against the caller's TaskProfile and whether the pattern was
/// pulled from another project in the same workspace (§4.H).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoringInputs {
    pub touch_overlaps: usize,
    pub tech_overlaps: usize,
    pub is_cross_project: bool,
    pub suspected_synthesis_drift: bool,
}

/// `injectionPriority = attributionConfidence * severityWeight *
/// relevanceWeight * recencyWeight * crossProjectMultiplier` (§4.H).
pub fn injection_priority(
    pattern: &Pattern,
    stats: &PatternStats,
    now_ms: u64,
    inputs: ScoringInputs,
) -> f64 {
    let confidence = attribution_confidence(pattern, stats, now_ms, inputs.suspected_synthesis_drift);
    let severity_weight = severity_weight(pattern.severity_max());
    let relevance = relevance_weight(inputs.touch_overlaps, inputs.tech_overlaps);
    let recency = recency_weight(stats.days_since_last_active(now_ms));
    let cross_project_multiplier = if inputs.is_cross_project { 0.95 } else { 1.0 };

    confidence * severity_weight * relevance * recency * cross_project_multiplier
}

fn severity_weight(severity: Severity) -> f64 {
    severity.weight()
}
