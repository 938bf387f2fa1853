use axum::{
    extract::{Request, State},
    response::Response,
};

use crate::api::dev::response;
use crate::error::AppError;
use crate::services::decision::AuthDecision;
use crate::services::inspect::Diagnostics;
use crate::state::AppState;

/// POST /dev/signin/. Reads the whole body, then allows with the fixed identity.
pub async fn signin(State(state): State<AppState>, req: Request) -> Result<Response, AppError> {
    let snapshot = state.inspector.inspect(req, Diagnostics::Disabled).await?;
    tracing::debug!(body_len = snapshot.body().len(), "signin");

    let decision = AuthDecision::allow(state.fixed_identity.clone());
    Ok(response::build(&decision, &snapshot))
}
