/*
 * Responsibility
 * - Identity claims attached to an allow decision
 * - AuthDecision: the one value an engine hands back per request
 *
 * Notes
 * - Identity values are validated as header values up front, so building the
 *   response headers later cannot fail.
 */
use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity {0} must not be empty")]
    Empty(&'static str),
    #[error("identity {0} is not a valid header value")]
    InvalidHeaderValue(&'static str),
}

/// Who the proxy should treat the caller as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user: String,
    groups: String,
    user_value: HeaderValue,
    groups_value: HeaderValue,
}

impl Identity {
    pub fn new(user: impl Into<String>, groups: impl Into<String>) -> Result<Self, IdentityError> {
        let user = user.into();
        let groups = groups.into();

        if user.is_empty() {
            return Err(IdentityError::Empty("user"));
        }
        if groups.is_empty() {
            return Err(IdentityError::Empty("groups"));
        }

        let user_value =
            HeaderValue::from_str(&user).map_err(|_| IdentityError::InvalidHeaderValue("user"))?;
        let groups_value = HeaderValue::from_str(&groups)
            .map_err(|_| IdentityError::InvalidHeaderValue("groups"))?;

        Ok(Self {
            user,
            groups,
            user_value,
            groups_value,
        })
    }

    /// Build from literals. Panics on invalid input, like `HeaderValue::from_static`.
    pub fn from_static(user: &'static str, groups: &'static str) -> Self {
        Self {
            user: user.to_string(),
            groups: groups.to_string(),
            user_value: HeaderValue::from_static(user),
            groups_value: HeaderValue::from_static(groups),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn groups(&self) -> &str {
        &self.groups
    }

    pub fn user_header(&self) -> &HeaderValue {
        &self.user_value
    }

    pub fn groups_header(&self) -> &HeaderValue {
        &self.groups_value
    }
}

/// Outcome of one policy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow(Identity),
    Deny { status: StatusCode },
}

impl AuthDecision {
    pub fn allow(identity: Identity) -> Self {
        Self::Allow(identity)
    }

    /// Deny with the fallback status (404).
    pub fn deny() -> Self {
        Self::deny_with(StatusCode::NOT_FOUND)
    }

    pub fn deny_with(status: StatusCode) -> Self {
        Self::Deny { status }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Allow(identity) => Some(identity),
            Self::Deny { .. } => None,
        }
    }

    /// Status the response will carry.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Allow(_) => StatusCode::OK,
            Self::Deny { status } => *status,
        }
    }
}
