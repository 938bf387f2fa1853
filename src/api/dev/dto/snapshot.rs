use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::services::inspect::{ClientAddr, RequestSnapshot};

/// JSON echo of a snapshot.
///
/// `body` is only present when built with `with_body` (echo server); the auth
/// endpoints never echo the body.
#[derive(Debug, Serialize)]
pub struct SnapshotEcho<'a> {
    pub client: Option<ClientAddr>,
    pub method: &'a str,
    pub url: &'a str,
    pub base_url: &'a str,
    pub query_params: &'a BTreeMap<String, String>,
    pub headers: &'a BTreeMap<String, String>,
    pub cookies: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Cow<'a, str>>,
}

impl<'a> SnapshotEcho<'a> {
    pub fn new(snapshot: &'a RequestSnapshot) -> Self {
        Self {
            client: snapshot.client(),
            method: snapshot.method(),
            url: snapshot.url(),
            base_url: snapshot.base_url(),
            query_params: snapshot.query_params(),
            headers: snapshot.headers(),
            cookies: snapshot.cookies(),
            body: None,
        }
    }

    pub fn with_body(snapshot: &'a RequestSnapshot) -> Self {
        Self {
            body: Some(snapshot.body_text()),
            ..Self::new(snapshot)
        }
    }
}
