// Timeout decorator for any probe port

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Bounds each probe call of the wrapped port.
///
/// An expired probe is reported as [`DomainError::Timeout`], so a batch probe
/// records it as that file's failure and frees the worker.
pub struct TimeoutProbe<P> {
    inner: P,
    limit: Duration,
}

impl<P: ProbePort> TimeoutProbe<P> {
    pub fn new(inner: P, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl<P: ProbePort> ProbePort for TimeoutProbe<P> {
    async fn probe(&self, path: &str) -> Result<ProbeMetadata, DomainError> {
        match tokio::time::timeout(self.limit, self.inner.probe(path)).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::Timeout {
                operation: format!("probe {}", path),
                seconds: self.limit.as_secs(),
            }),
        }
    }
}
