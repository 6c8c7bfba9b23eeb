//! Batch evolution jobs that keep the stored Pattern/Alert/SalienceIssue/
//! DerivedPrinciple population honest over time, independent of any single
//! attribution call (§4.K): confidence decay archives patterns whose
//! evidence has gone stale, provisional-alert lifecycle promotes or expires
//! alerts, principle promotion lifts recurring aligned patterns into a
//! standing workspace-level principle, and salience detection flags
//! carrier locations whose guidance keeps being injected yet keeps being
//! violated.

mod alert_lifecycle;
mod confidence_decay;
mod error;
mod principle_promotion;
mod salience_detection;

pub use alert_lifecycle::{run_alert_lifecycle, AlertLifecycleReport};
pub use confidence_decay::{run_confidence_decay, DECAY_ARCHIVE_THRESHOLD};
pub use error::EvolutionError;
pub use principle_promotion::{
    run_principle_promotion, PrinciplePromotionReport, PRINCIPLE_PROMOTION_MIN_PATTERNS,
};
pub use salience_detection::{run_salience_detection, SALIENCE_THRESHOLD, SALIENCE_WINDOW_MS};
