//! Bookkeeping shared by the async store operations

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

use crate::error::DeskError;
use crate::LibResult;

/// Counts outstanding operations and optionally admits only one at a time
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    count: AtomicUsize,
}

impl InFlight {
    /// Register an operation; with `exclusive` set, fail if one is running
    pub(crate) fn enter(&self, operation: &str, exclusive: bool) -> LibResult<InFlightGuard<'_>> {
        if exclusive {
            self.count
                .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
                .map_err(|_| DeskError::busy(operation))?;
        } else {
            self.count.fetch_add(1, Ordering::AcqRel);
        }
        Ok(InFlightGuard { count: &self.count })
    }

    pub(crate) fn pending(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}

/// Releases its slot when the operation finishes or is dropped
pub(crate) struct InFlightGuard<'a> {
    count: &'a AtomicUsize,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Await `call`, giving up early when `cancel` fires
pub(crate) async fn until_cancelled<T, F>(
    operation: &str,
    cancel: Option<&CancellationToken>,
    call: F,
) -> LibResult<T>
where
    F: Future<Output = LibResult<T>>,
{
    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(DeskError::cancelled(operation)),
                result = call => result,
            }
        }
        None => call.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::time::Duration;

    #[test]
    fn test_shared_mode_counts() {
        let flight = InFlight::default();
        let a = flight.enter("login", false).unwrap();
        let b = flight.enter("login", false).unwrap();
        assert_eq!(flight.pending(), 2);
        drop(a);
        drop(b);
        assert_eq!(flight.pending(), 0);
    }

    #[test]
    fn test_exclusive_mode_rejects_second() {
        let flight = InFlight::default();
        let guard = flight.enter("register", true).unwrap();
        let err = flight.enter("register", true).err().unwrap();
        assert_eq!(err.code(), ErrorCode::OPERATION_IN_FLIGHT);
        drop(guard);
        assert!(flight.enter("register", true).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_wins_over_slow_call() {
        let token = CancellationToken::new();
        token.cancel();
        let result: LibResult<u8> = until_cancelled("submit", Some(&token), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(1)
        })
        .await;
        assert_eq!(result.unwrap_err().code(), ErrorCode::OPERATION_CANCELLED);
    }

    #[tokio::test]
    async fn test_without_token_runs_to_completion() {
        let result = until_cancelled("submit", None, async { Ok(7u8) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
