//! Decision engine interface.
use async_trait::async_trait;

use super::types::AuthDecision;
use crate::services::inspect::RequestSnapshot;

/// Maps a request snapshot to an allow/deny outcome.
///
/// Implementations must not mutate shared state. Any I/O must be bounded
/// (wrap the engine in `TimeoutEngine`); failures and timeouts are reported as
/// `AuthDecision::Deny`, never as errors.
#[async_trait]
pub trait DecisionEngine: Send + Sync + 'static {
    // Engine name (for logging).
    fn name(&self) -> &'static str;

    async fn decide(&self, snapshot: &RequestSnapshot) -> AuthDecision;
}
