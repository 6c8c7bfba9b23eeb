use guidewright_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
