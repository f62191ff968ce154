use futures::future::{AbortHandle, Abortable, Aborted};
use std::future::Future;

use crate::error::{LabError, Result};

/// Keeps at most one request of a kind alive.
///
/// Starting a request aborts the previous one, whose future then resolves to
/// [`LabError::Cancelled`]. A stale response can therefore never land after
/// a newer selection was made.
#[derive(Debug, Default)]
pub struct LatestRequest {
    current: Option<AbortHandle>,
    started: u64,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the in-flight request, if any, and make `request` the current one.
    pub fn run<F, T>(&mut self, request: F) -> impl Future<Output = Result<T>>
    where
        F: Future<Output = Result<T>>,
    {
        self.cancel();
        let (handle, registration) = AbortHandle::new_pair();
        self.current = Some(handle);
        self.started += 1;
        async move {
            match Abortable::new(request, registration).await {
                Ok(outcome) => outcome,
                Err(Aborted) => Err(LabError::Cancelled),
            }
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }

    /// Number of requests started so far.
    pub fn started(&self) -> u64 {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn newer_request_cancels_older() {
        let mut latest = LatestRequest::new();
        let first = latest.run(futures::future::pending::<Result<u32>>());
        let second = latest.run(async { Ok(7u32) });
        assert!(matches!(first.await, Err(LabError::Cancelled)));
        assert_eq!(second.await.unwrap(), 7);
        assert_eq!(latest.started(), 2);
    }

    #[tokio::test]
    async fn explicit_cancel() {
        let mut latest = LatestRequest::new();
        let request = latest.run(async { Ok("analyses") });
        latest.cancel();
        assert!(matches!(request.await, Err(LabError::Cancelled)));
    }

    #[tokio::test]
    async fn errors_pass_through() {
        let mut latest = LatestRequest::new();
        let outcome = latest
            .run(async { Err::<(), _>(LabError::Unauthenticated) })
            .await;
        assert!(matches!(outcome, Err(LabError::Unauthenticated)));
    }
}
