use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;

use super::engine::DecisionEngine;
use super::types::AuthDecision;
use crate::services::inspect::RequestSnapshot;

/// Bounds another engine's `decide`. An elapsed check becomes a 503 deny.
#[derive(Debug, Clone)]
pub struct TimeoutEngine<E> {
    inner: E,
    timeout: Duration,
}

impl<E: DecisionEngine> TimeoutEngine<E> {
    pub fn new(inner: E, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<E: DecisionEngine> DecisionEngine for TimeoutEngine<E> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn decide(&self, snapshot: &RequestSnapshot) -> AuthDecision {
        match tokio::time::timeout(self.timeout, self.inner.decide(snapshot)).await {
            Ok(decision) => decision,
            Err(_) => {
                tracing::warn!(
                    engine = self.inner.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "policy check timed out"
                );
                AuthDecision::deny_with(StatusCode::SERVICE_UNAVAILABLE)
            }
        }
    }
}
