use async_trait::async_trait;

use super::engine::DecisionEngine;
use super::types::{AuthDecision, Identity};
use crate::services::inspect::RequestSnapshot;

/// Allows every request with one fixed identity.
///
/// Stand-in policy for development; nothing else depends on it always allowing.
#[derive(Debug, Clone)]
pub struct StaticIdentityEngine {
    identity: Identity,
}

impl StaticIdentityEngine {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl DecisionEngine for StaticIdentityEngine {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn decide(&self, _snapshot: &RequestSnapshot) -> AuthDecision {
        AuthDecision::allow(self.identity.clone())
    }
}
