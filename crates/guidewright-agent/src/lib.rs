//! The external Attribution Agent collaborator (§6): the one boundary the
//! core never implements itself. Given a Finding plus the context-pack and
//! spec content it was reviewed against, the agent produces the
//! `EvidenceBundle` that everything downstream — the Failure-Mode Resolver,
//! the Noncompliance Checker, pattern creation — is derived from. This crate
//! only defines the collaborator trait and a scripted stand-in; a real
//! deployment wires a model-backed implementation behind the same trait.

mod error;
mod simulated;

pub use error::AgentError;
pub use simulated::SimulatedAttributionAgent;

use async_trait::async_trait;
use guidewright_evidence::{EvidenceBundle, Finding};

/// External callable the orchestrator invokes once per Finding (§4.G step 2).
/// May fail; a failure aborts the whole attribution with no side effects, so
/// implementations must not perform any writes of their own.
#[async_trait]
pub trait AttributionAgent: Send + Sync {
    async fn attribute(
        &self,
        finding: &Finding,
        context_pack_content: &str,
        spec_content: &str,
    ) -> Result<EvidenceBundle, AgentError>;
}
