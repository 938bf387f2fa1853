/*
 * Responsibility
 * - GET /dev/ and GET /dev/ping/ (reachability check)
 * - Always allows with the fixed identity; no policy, no diagnostics
 */
use axum::{
    extract::{Request, State},
    response::Response,
};

use crate::api::dev::response;
use crate::error::AppError;
use crate::services::decision::AuthDecision;
use crate::services::inspect::Diagnostics;
use crate::state::AppState;

pub async fn index(State(state): State<AppState>, req: Request) -> Result<Response, AppError> {
    let snapshot = state.inspector.inspect(req, Diagnostics::Disabled).await?;
    let decision = AuthDecision::allow(state.fixed_identity.clone());

    Ok(response::build(&decision, &snapshot))
}
