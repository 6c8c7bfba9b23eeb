use guidewright_evidence::{PatternId, Scope};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("scope not found: {0}")]
    ScopeNotFound(Scope),
    #[error("scope archived: {0}")]
    ScopeArchived(Scope),
    #[error("pattern not found: {0}")]
    PatternNotFound(PatternId),
    #[error("pattern already exists: {0}")]
    AlreadyExists(PatternId),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("conflict: {0}")]
    ConflictViolation(String),
    #[error("transient storage failure: {0}")]
    TransientStorageFailure(String),
    #[error("lock poisoned: {0}")]
    Io(String),
}

impl StoreError {
    /// Whether a caller should retry this operation with backoff, per the
    /// recovery policy: only transient storage failures are retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::TransientStorageFailure(_))
    }
}
