/*
 * Responsibility
 * - GET /dev/auth/: the auth_request subrequest target
 * - snapshot (with diagnostic dump) → DecisionEngine → response
 */
use axum::{
    extract::{Request, State},
    response::Response,
};

use crate::api::dev::response;
use crate::error::AppError;
use crate::services::inspect::Diagnostics;
use crate::state::AppState;

pub async fn auth(State(state): State<AppState>, req: Request) -> Result<Response, AppError> {
    let snapshot = state.inspector.inspect(req, Diagnostics::Enabled).await?;
    let decision = state.engine.decide(&snapshot).await;

    tracing::info!(
        engine = state.engine.name(),
        allowed = decision.is_allowed(),
        status = decision.status().as_u16(),
        "auth decision"
    );

    Ok(response::build(&decision, &snapshot))
}
