/*
 * Responsibility
 * - Fallback for unmatched paths and method mismatches on known paths
 * - Always the same 404 body; never identity headers
 */
use axum::extract::{Request, State};

use crate::error::AppError;
use crate::services::inspect::Diagnostics;
use crate::state::AppState;

pub async fn not_found(State(state): State<AppState>, req: Request) -> AppError {
    tracing::warn!(method = %req.method(), uri = %req.uri(), "no route matched");

    // Drain the request like every other path; a broken body changes nothing here.
    if let Err(err) = state.inspector.inspect(req, Diagnostics::Disabled).await {
        tracing::debug!(error = %err, "fallback inspection failed");
    }

    AppError::RouteNotFound
}
