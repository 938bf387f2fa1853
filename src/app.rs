/*
 * Responsibility
 * - Config load → dependency construction → Router assembly
 * - Middleware application
 * - axum::serve() with connect info and graceful shutdown
 */
use std::net::SocketAddr;
use std::sync::Arc;
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::decision::build_decision_engine;
use crate::services::inspect::{RequestInspector, TracingSink};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,authco=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get lost.
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: keep serving; CatchPanicLayer answers 500.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting authco in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Build process-level services once and put them into the shared state.
pub fn build_state(config: &Config) -> AppState {
    let inspector = RequestInspector::new(Arc::new(TracingSink), config.body_limit);
    let engine = build_decision_engine(config);

    AppState::new(inspector, engine, config.identity.clone())
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .merge(api::dev::routes())
        .method_not_allowed_fallback(api::dev::not_found)
        .fallback(api::dev::not_found)
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .with_state(state);

    middleware::http::apply(router, config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("received shutdown signal, shutting down gracefully");
}
