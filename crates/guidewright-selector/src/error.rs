use guidewright_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
