use guidewright_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum KillSwitchError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
