use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authco::api::dev::dto::SnapshotEcho;
use authco::error::AppError;
use authco::services::inspect::{Diagnostics, RequestInspector, TracingSink};

/// Bodies past this size are not echoed; the request fails with a 500.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let port: u16 = env_or("DUMMY_PORT", 8081)?;
    let body_limit: usize = env_or("DUMMY_BODY_LIMIT_BYTES", BODY_LIMIT)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let inspector = RequestInspector::new(Arc::new(TracingSink), body_limit);
    let app = build_router(inspector);

    tracing::info!("echo server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .ok()
            .with_context(|| format!("invalid value for {key}: {raw}")),
        Err(_) => Ok(default),
    }
}

pub fn build_router(inspector: RequestInspector) -> Router {
    Router::new().fallback(echo).with_state(inspector)
}

async fn echo(State(inspector): State<RequestInspector>, req: Request) -> Result<Response, AppError> {
    let snapshot = inspector.inspect(req, Diagnostics::Enabled).await?;
    Ok((StatusCode::OK, Json(SnapshotEcho::with_body(&snapshot))).into_response())
}
