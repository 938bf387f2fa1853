use std::borrow::Cow;
use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::body::Bytes;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Peer address of the connection that carried the request.
///
/// Serialized as `[host, port]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientAddr(SocketAddr);

impl ClientAddr {
    pub fn new(addr: SocketAddr) -> Self {
        Self(addr)
    }

    pub fn host(&self) -> String {
        self.0.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.0.port()
    }
}

impl Serialize for ClientAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.host(), self.port()).serialize(serializer)
    }
}

/// Frozen view of one inbound request.
///
/// Built once by `RequestInspector`; every consumer only gets `&RequestSnapshot`,
/// so decisions made from it are repeatable.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    pub(super) client: Option<ClientAddr>,
    pub(super) method: String,
    pub(super) url: String,
    pub(super) base_url: String,
    pub(super) query_params: BTreeMap<String, String>,
    pub(super) headers: BTreeMap<String, String>,
    pub(super) cookies: BTreeMap<String, String>,
    pub(super) body: Bytes,
    pub(super) captured_at: DateTime<Utc>,
}

impl RequestSnapshot {
    pub fn client(&self) -> Option<ClientAddr> {
        self.client
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query_params
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn cookies(&self) -> &BTreeMap<String, String> {
        &self.cookies
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as text; invalid UTF-8 is replaced, never rejected.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}
