/// Failure modes of the external Attribution Agent collaborator (§6, §7
/// `ExternalAgentFailure`). Either one aborts the calling attribution with a
/// typed error and no side effects — the orchestrator never partially
/// writes on an agent failure.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("attribution agent timed out after {0}ms")]
    Timeout(u64),
    #[error("attribution agent returned a malformed evidence bundle: {0}")]
    MalformedEvidence(String),
}
