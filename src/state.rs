/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - inspector (with its diagnostic sink), decision engine, fixed identity
 * - Built once at startup and read-only afterwards; Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::services::decision::{DecisionEngine, Identity};
use crate::services::inspect::RequestInspector;

#[derive(Clone)]
pub struct AppState {
    pub inspector: RequestInspector,
    pub engine: Arc<dyn DecisionEngine>,
    pub fixed_identity: Identity,
}

impl AppState {
    pub fn new(
        inspector: RequestInspector,
        engine: Arc<dyn DecisionEngine>,
        fixed_identity: Identity,
    ) -> Self {
        Self {
            inspector,
            engine,
            fixed_identity,
        }
    }
}
