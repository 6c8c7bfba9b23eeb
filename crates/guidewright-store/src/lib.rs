//! Scoped, content-addressed storage for patterns, occurrences, derived
//! principles, and the secondary outcomes an attribution decision can
//! produce (noncompliance records, doc-update requests, tagging misses,
//! injection logs, provisional alerts, salience issues, kill-switch state).

mod error;
mod kill_switch_status;
mod occurrence;
mod pattern;
mod principle;
mod retry;
mod secondary;
mod sha256_key;
mod storage;

pub use error::StoreError;
pub use kill_switch_status::{KillSwitchState, KillSwitchStatus};
pub use occurrence::{InactiveReason, OccurrenceStatus, PatternOccurrence};
pub use pattern::{Pattern, PatternKey, PatternStatus};
pub use principle::{DerivedPrinciple, PrincipleOrigin};
pub use retry::retry_with_backoff;
pub use secondary::{
    AlertOccurrenceRef, AlertStatus, AttributionOutcome, DocUpdateRequest, DocUpdateStatus,
    ExecutionNoncompliance, InjectionLog, ProvisionalAlert, SalienceIssue, SalienceStatus,
    TaggingMiss, ALERT_EXPIRY_MS,
};
pub use sha256_key::Sha256Key;
pub use storage::{InMemoryStore, Store};
