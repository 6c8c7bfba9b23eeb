use guidewright_evidence::{DocFingerprint, Finding, Scope};

/// Everything the orchestrator needs for one `run_attribution` call (§4.G).
/// The core never resolves a `DocFingerprint` itself, so a caller that
/// wants a provenance chain beyond the carrier must supply the origin
/// fingerprint up front — it is only consulted when the returned evidence
/// says the cited source was retrievable.
#[derive(Debug, Clone)]
pub struct AttributionInput {
    pub scope: Scope,
    pub finding: Finding,
    pub context_pack_content: String,
    pub spec_content: String,
    pub context_pack_fingerprint: DocFingerprint,
    pub spec_fingerprint: DocFingerprint,
    pub origin_fingerprint: Option<DocFingerprint>,
}
