use guidewright_evidence::{
    Adherence, ContentHash, DocFingerprint, EvidenceBundle, FindingId, OccurrenceId, PatternId,
    Severity,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccurrenceStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InactiveReason {
    SupersededDoc,
    PatternArchived,
    FalsePositive,
}

/// One observed instance of a `Pattern`: the finding that surfaced it, the
/// evidence the Attribution Agent produced, and the provenance chain from
/// carrier document back to (if any) the originating doc. Occurrences are
/// append-only; they move to `Inactive` but are never deleted (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternOccurrence {
    pub id: OccurrenceId,
    pub pattern_id: PatternId,
    pub finding_id: FindingId,
    pub evidence: EvidenceBundle,
    pub carrier_fingerprint: DocFingerprint,
    pub origin_fingerprint: Option<DocFingerprint>,
    pub provenance_chain: Vec<DocFingerprint>,
    pub carrier_excerpt_hash: ContentHash,
    pub origin_excerpt_hash: Option<ContentHash>,
    pub severity: Severity,
    pub status: OccurrenceStatus,
    pub inactive_reason: Option<InactiveReason>,
    pub was_injected: bool,
    pub was_adhered_to: Adherence,
    pub created_at_ms: u64,
}

impl PatternOccurrence {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OccurrenceId,
        pattern_id: PatternId,
        finding_id: FindingId,
        evidence: EvidenceBundle,
        carrier_fingerprint: DocFingerprint,
        origin_fingerprint: Option<DocFingerprint>,
        provenance_chain: Vec<DocFingerprint>,
        origin_excerpt_hash: Option<ContentHash>,
        severity: Severity,
        now_ms: u64,
    ) -> Self {
        let carrier_excerpt_hash = ContentHash::hash(evidence.carrier_quote.as_bytes());
        Self {
            id,
            pattern_id,
            finding_id,
            evidence,
            carrier_fingerprint,
            origin_fingerprint,
            provenance_chain,
            carrier_excerpt_hash,
            origin_excerpt_hash,
            severity,
            status: OccurrenceStatus::Active,
            inactive_reason: None,
            was_injected: false,
            was_adhered_to: Adherence::Unknown,
            created_at_ms: now_ms,
        }
    }

    pub fn mark_injected(&mut self) {
        self.was_injected = true;
    }

    pub fn record_adherence(&mut self, adherence: Adherence) {
        self.was_adhered_to = adherence;
    }

    pub fn deactivate(&mut self, reason: InactiveReason) {
        self.status = OccurrenceStatus::Inactive;
        self.inactive_reason = Some(reason);
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, OccurrenceStatus::Active)
    }
}
