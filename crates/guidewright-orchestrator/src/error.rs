use guidewright_agent::AgentError;
use guidewright_killswitch::KillSwitchError;
use guidewright_store::StoreError;

/// Error taxonomy the orchestrator surfaces (§7). `TransientStorageFailure`
/// inside `StoreError` is the only kind a caller might retry; every other
/// variant means the attempt made no writes beyond what had already
/// committed before the failing step.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    KillSwitch(#[from] KillSwitchError),
    #[error("external attribution agent failed: {0}")]
    Agent(#[from] AgentError),
}
