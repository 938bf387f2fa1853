//! Diagnostic sink: where full request dumps go when an endpoint asks for them.
use thiserror::Error;

use super::RequestSnapshot;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("diagnostic encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("diagnostic sink unavailable: {0}")]
    Unavailable(String),
}

/// Receives snapshots for diagnostic output.
///
/// Best-effort only: `RequestInspector` swallows every `Err` returned here.
pub trait DiagnosticSink: Send + Sync {
    // Sink name (for logging).
    fn name(&self) -> &'static str;

    fn record(&self, snapshot: &RequestSnapshot) -> Result<(), SinkError>;
}

/// Writes one structured `tracing` event per snapshot under the
/// `authco::diagnostics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn record(&self, snapshot: &RequestSnapshot) -> Result<(), SinkError> {
        let client = snapshot
            .client()
            .map(|c| format!("{}:{}", c.host(), c.port()))
            .unwrap_or_default();
        let query_params = serde_json::to_string(snapshot.query_params())?;
        let headers = serde_json::to_string(snapshot.headers())?;
        let cookies = serde_json::to_string(snapshot.cookies())?;

        tracing::info!(
            target: "authco::diagnostics",
            request_time = %snapshot.captured_at().to_rfc3339(),
            client = %client,
            method = %snapshot.method(),
            url = %snapshot.url(),
            base_url = %snapshot.base_url(),
            query_params = %query_params,
            headers = %headers,
            cookies = %cookies,
            body = %snapshot.body_text(),
            "[{}] {}",
            snapshot.method(),
            snapshot.url(),
        );

        Ok(())
    }
}
