use guidewright_evolution::EvolutionError;
use guidewright_orchestrator::OrchestratorError;
use guidewright_selector::SelectorError;
use guidewright_store::StoreError;

/// Error taxonomy the facade surfaces, composed from the four subsystems
/// it wires together. A caller that only ever hits one entry point (say,
/// `attribute`) only ever sees `Orchestrator`/`Store` variants from it.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error(transparent)]
    Evolution(#[from] EvolutionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
