//! AuthDecision + snapshot → HTTP response.
//!
//! - Allow: 200, snapshot echo (no body), `X-Auth-User` / `X-Auth-Groups`
//! - Deny: decision status, `{"detail": "Not Found", "status_code": n}`, no identity headers

use axum::{
    Json,
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
};

use crate::api::dev::dto::SnapshotEcho;
use crate::error::ErrorBody;
use crate::services::decision::AuthDecision;
use crate::services::inspect::RequestSnapshot;

pub const X_AUTH_USER: HeaderName = HeaderName::from_static("x-auth-user");
pub const X_AUTH_GROUPS: HeaderName = HeaderName::from_static("x-auth-groups");

pub fn build(decision: &AuthDecision, snapshot: &RequestSnapshot) -> Response {
    match decision {
        AuthDecision::Allow(identity) => {
            let mut response = (StatusCode::OK, Json(SnapshotEcho::new(snapshot))).into_response();
            let headers = response.headers_mut();
            headers.insert(X_AUTH_USER, identity.user_header().clone());
            headers.insert(X_AUTH_GROUPS, identity.groups_header().clone());
            response
        }
        AuthDecision::Deny { status } => (*status, Json(ErrorBody::denied(*status))).into_response(),
    }
}
