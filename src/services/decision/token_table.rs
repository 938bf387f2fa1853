//! Credential lookup against a static token table.
//!
//! Credential source, in order:
//! 1. `Authorization: Bearer <token>`
//! 2. the configured session cookie
//!
//! No credential → 401, unknown credential → 403.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

use super::engine::DecisionEngine;
use super::types::{AuthDecision, Identity, IdentityError};
use crate::services::inspect::RequestSnapshot;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenTableError {
    #[error("malformed token entry: {0}")]
    Malformed(String),
    #[error("token entry {token:?}: {source}")]
    Identity {
        token: String,
        #[source]
        source: IdentityError,
    },
    #[error("token table is empty")]
    Empty,
}

/// Parse `token=user:group1,group2;token2=user2:group`.
pub fn parse_token_table(raw: &str) -> Result<HashMap<String, Identity>, TokenTableError> {
    let mut table = HashMap::new();

    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (token, claims) = entry
            .split_once('=')
            .ok_or_else(|| TokenTableError::Malformed(entry.to_string()))?;
        let (user, groups) = claims
            .split_once(':')
            .ok_or_else(|| TokenTableError::Malformed(entry.to_string()))?;

        let token = token.trim();
        if token.is_empty() {
            return Err(TokenTableError::Malformed(entry.to_string()));
        }

        let identity =
            Identity::new(user.trim(), groups.trim()).map_err(|source| TokenTableError::Identity {
                token: token.to_string(),
                source,
            })?;
        table.insert(token.to_string(), identity);
    }

    if table.is_empty() {
        return Err(TokenTableError::Empty);
    }
    Ok(table)
}

#[derive(Debug, Clone)]
pub struct TokenTableEngine {
    tokens: HashMap<String, Identity>,
    session_cookie: String,
}

impl TokenTableEngine {
    pub fn new(tokens: HashMap<String, Identity>, session_cookie: impl Into<String>) -> Self {
        Self {
            tokens,
            session_cookie: session_cookie.into(),
        }
    }

    fn credential<'a>(&self, snapshot: &'a RequestSnapshot) -> Option<&'a str> {
        snapshot
            .header("authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or_else(|| {
                snapshot
                    .cookie(&self.session_cookie)
                    .filter(|t| !t.is_empty())
            })
    }
}

#[async_trait]
impl DecisionEngine for TokenTableEngine {
    fn name(&self) -> &'static str {
        "token"
    }

    async fn decide(&self, snapshot: &RequestSnapshot) -> AuthDecision {
        let Some(token) = self.credential(snapshot) else {
            tracing::debug!(url = %snapshot.url(), "no credential presented");
            return AuthDecision::deny_with(StatusCode::UNAUTHORIZED);
        };

        match self.tokens.get(token) {
            Some(identity) => AuthDecision::allow(identity.clone()),
            None => {
                tracing::debug!(url = %snapshot.url(), "unknown credential");
                AuthDecision::deny_with(StatusCode::FORBIDDEN)
            }
        }
    }
}
