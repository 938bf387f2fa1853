use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{Body, Bytes, to_bytes};
use axum::extract::ConnectInfo;
use axum::http::{Request, header, request::Parts};
use chrono::Utc;
use url::Url;

use super::cookies;
use super::sink::DiagnosticSink;
use super::snapshot::{ClientAddr, RequestSnapshot};
use crate::error::AppError;

/// Whether `inspect` also hands the snapshot to the diagnostic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostics {
    Enabled,
    Disabled,
}

/// Turns a live request into a `RequestSnapshot`.
///
/// Cheap to clone; the sink is shared and read-only after startup.
#[derive(Clone)]
pub struct RequestInspector {
    sink: Arc<dyn DiagnosticSink>,
    body_limit: usize,
}

impl RequestInspector {
    pub fn new(sink: Arc<dyn DiagnosticSink>, body_limit: usize) -> Self {
        Self { sink, body_limit }
    }

    /// Consume `req` and capture it.
    ///
    /// The body is read exactly once, here. If it cannot be read (already
    /// drained, stream error, over the limit) the request fails with
    /// `AppError::BodyUnavailable`.
    pub async fn inspect(
        &self,
        req: Request<Body>,
        diagnostics: Diagnostics,
    ) -> Result<RequestSnapshot, AppError> {
        let (parts, body) = req.into_parts();

        let body = to_bytes(body, self.body_limit)
            .await
            .map_err(|err| AppError::body_unavailable(err.to_string()))?;

        let snapshot = capture(&parts, body);

        if diagnostics == Diagnostics::Enabled {
            self.emit(&snapshot);
        }

        Ok(snapshot)
    }

    fn emit(&self, snapshot: &RequestSnapshot) {
        if let Err(err) = self.sink.record(snapshot) {
            tracing::debug!(sink = self.sink.name(), error = %err, "diagnostic sink failed");
        }
    }
}

fn capture(parts: &Parts, body: Bytes) -> RequestSnapshot {
    let client = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| ClientAddr::new(*addr));

    let (url, base_url) = request_urls(parts);

    let query_params = parts
        .uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect::<BTreeMap<_, _>>()
        })
        .unwrap_or_default();

    let mut headers = BTreeMap::new();
    for (name, value) in parts.headers.iter() {
        headers.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }

    let mut cookie_map = BTreeMap::new();
    for value in parts.headers.get_all(header::COOKIE) {
        cookies::parse_into(&String::from_utf8_lossy(value.as_bytes()), &mut cookie_map);
    }

    RequestSnapshot {
        client,
        method: parts.method.as_str().to_string(),
        url,
        base_url,
        query_params,
        headers,
        cookies: cookie_map,
        body,
        captured_at: Utc::now(),
    }
}

/// Fully-qualified request URL and mount base (`scheme://host/`).
///
/// Host resolution: URI authority, then `Host` header, then `localhost`.
fn request_urls(parts: &Parts) -> (String, String) {
    let scheme = parts.uri.scheme_str().unwrap_or("http");
    let host = parts
        .uri
        .authority()
        .map(|a| a.as_str().to_string())
        .or_else(|| {
            parts
                .headers
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "localhost".to_string());
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    // The path is appended verbatim: dot segments and a leading `//` are
    // part of what the client sent and must not move the host.
    let base = Url::parse(&format!("{scheme}://{host}/"))
        .map(String::from)
        // Unparseable Host header: echo it as received.
        .unwrap_or_else(|_| format!("{scheme}://{host}/"));
    let url = format!("{}{path_and_query}", base.trim_end_matches('/'));
    (url, base)
}
