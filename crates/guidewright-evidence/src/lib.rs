//! Primitive types shared by every crate in the attribution & evolution
//! engine: content hashes, scope identifiers, the injectable clock/uuid
//! sources, severity/adherence/quote-type/instruction-kind vocabularies,
//! carrier document fingerprints, findings, task tags, and the evidence
//! bundle that ties them together. This is the most upstream crate in the
//! workspace's dependency graph — it has no dependency on any other
//! workspace crate.

mod clock;
mod doc_fingerprint;
mod evidence_bundle;
mod failure_mode;
mod finding;
mod hash;
mod quote_type;
mod scope;
mod scout_type;
mod severity;
mod stage;
mod tags;

pub use clock::{Clock, FixedClock, RandomUuidSource, SequentialUuidSource, SystemClock, UuidSource};
pub use doc_fingerprint::DocFingerprint;
pub use evidence_bundle::EvidenceBundle;
pub use failure_mode::FailureMode;
pub use finding::{Finding, FindingValidationError, Location};
pub use hash::{ContentHash, ContentHashError};
pub use quote_type::{CarrierInstructionKind, CarrierQuoteType};
pub use scope::{
    AlertId, DocUpdateRequestId, FindingId, InjectionLogId, NoncomplianceId, OccurrenceId,
    OutcomeId, PatternId, PrincipleId, ProjectId, ProjectStatus, SalienceIssueId, Scope,
    TaggingMissId, WorkspaceId,
};
pub use scout_type::ScoutType;
pub use severity::{Adherence, Severity};
pub use stage::{InjectionTarget, Stage};
pub use tags::{Tags, TaskProfile};
