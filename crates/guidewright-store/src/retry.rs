use crate::error::StoreError;
use std::future::Future;

/// Retries a transient-storage-failure operation a bounded number of times
/// with linearly increasing backoff. Delay is expressed in milliseconds and
/// handed to the caller-supplied sleep function so tests can run this with
/// a zero-cost sleep instead of a real one.
pub async fn retry_with_backoff<F, Fut, T, S, SFut>(
    max_attempts: u32,
    base_delay_ms: u64,
    mut op: F,
    mut sleep: S,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
    S: FnMut(u64) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt + 1 < max_attempts => {
                attempt += 1;
                sleep(base_delay_ms * attempt as u64).await;
            }
            Err(err) => return Err(err),
        }
    }
}
