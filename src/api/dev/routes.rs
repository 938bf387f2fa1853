/*
 * Responsibility
 * - URL structure of the /dev surface
 * - Paths are registered verbatim: trailing slashes matter and nothing redirects
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::dev::handlers::{auth::auth, index::index, signin::signin};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dev/", get(index))
        .route("/dev/ping/", get(index))
        .route("/dev/auth/", get(auth))
        .route("/dev/signin/", post(signin))
}
