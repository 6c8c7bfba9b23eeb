use crate::error::AgentError;
use async_trait::async_trait;
use guidewright_evidence::{
    CarrierInstructionKind, CarrierQuoteType, EvidenceBundle, Finding, FindingId, ScoutType, Stage,
};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::AttributionAgent;

/// Stand-in for the real Attribution Agent, for tests and the demo
/// walkthrough — no model call, no network. Responses for specific findings
/// can be scripted in advance (consumed once, so a retried call after a
/// scripted failure falls through to the default heuristic); any finding
/// with no scripted response gets a plausible `EvidenceBundle` derived from
/// whether its evidence text actually appears in the supplied documents.
#[derive(Default)]
pub struct SimulatedAttributionAgent {
    scripted: Mutex<HashMap<FindingId, Result<EvidenceBundle, AgentError>>>,
}

impl SimulatedAttributionAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot response for `finding_id`. The next `attribute` call
    /// for that finding consumes it; subsequent calls fall back to the
    /// default heuristic.
    pub async fn script(&self, finding_id: FindingId, response: Result<EvidenceBundle, AgentError>) {
        self.scripted.lock().await.insert(finding_id, response);
    }

    /// Derives a deterministic `EvidenceBundle` from the finding and the
    /// documents it was reviewed against, with no scripting involved.
    /// Quote type escalates with how literally the evidence text shows up in
    /// the context pack versus the spec; everything else defaults to the
    /// least alarming classification so a caller that wants a specific
    /// failure mode must script it explicitly.
    fn derive_default(finding: &Finding, context_pack_content: &str, spec_content: &str) -> EvidenceBundle {
        let evidence_lower = finding.evidence.to_lowercase();
        let carrier_quote_type = if !evidence_lower.is_empty() && context_pack_content.to_lowercase().contains(&evidence_lower)
        {
            CarrierQuoteType::Verbatim
        } else if !evidence_lower.is_empty() && spec_content.to_lowercase().contains(&evidence_lower) {
            CarrierQuoteType::Paraphrase
        } else {
            CarrierQuoteType::Inferred
        };

        let carrier_stage = if !context_pack_content.is_empty() {
            Stage::ContextPack
        } else {
            Stage::Spec
        };

        let carrier_instruction_kind = if matches!(finding.scout_type, ScoutType::Security | ScoutType::Adversarial)
            && carrier_quote_type == CarrierQuoteType::Verbatim
        {
            CarrierInstructionKind::ExplicitlyHarmful
        } else {
            CarrierInstructionKind::Descriptive
        };

        EvidenceBundle {
            carrier_stage,
            carrier_quote: finding.evidence.clone(),
            carrier_quote_type,
            carrier_instruction_kind,
            has_citation: !spec_content.is_empty(),
            source_retrievable: !spec_content.is_empty(),
            source_agrees_with_carrier: None,
            mandatory_doc_missing: false,
            has_testable_acceptance_criteria: true,
            conflict_signals: vec![],
            vagueness_signals: vec![],
        }
    }
}

#[async_trait]
impl AttributionAgent for SimulatedAttributionAgent {
    async fn attribute(
        &self,
        finding: &Finding,
        context_pack_content: &str,
        spec_content: &str,
    ) -> Result<EvidenceBundle, AgentError> {
        if let Some(scripted) = self.scripted.lock().await.remove(&finding.id) {
            return scripted;
        }
        Ok(Self::derive_default(finding, context_pack_content, spec_content))
    }
}
