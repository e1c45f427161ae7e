//! Per-call deadline applied by every service entry point.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// A service call ran past its configured deadline.
///
/// Elapsing does not undo work the stores already committed: a write that
/// lands just before the deadline stays written even though the caller is
/// told the call failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} did not finish within {limit:?}")]
pub struct DeadlineExceeded {
    pub operation: &'static str,
    pub limit: Duration,
}

/// Runs `fut` and gives up once `limit` elapses.
pub async fn within<F, T, E>(limit: Duration, operation: &'static str, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<DeadlineExceeded>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, ?limit, "Deadline exceeded");
            Err(DeadlineExceeded { operation, limit }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Failure {
        Late(&'static str),
    }

    impl From<DeadlineExceeded> for Failure {
        fn from(e: DeadlineExceeded) -> Self {
            Failure::Late(e.operation)
        }
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let out: Result<u8, Failure> = within(Duration::from_secs(1), "fast", async { Ok(7) }).await;
        assert_eq!(out, Ok(7));
    }

    #[tokio::test]
    async fn test_slow_call_is_cut_off() {
        let out: Result<u8, Failure> = within(Duration::from_millis(50), "slow", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(1)
        })
        .await;
        assert_eq!(out, Err(Failure::Late("slow")));
    }
}
