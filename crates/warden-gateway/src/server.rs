//! HTTP server implementation using Axum.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use warden_scheduler::{Dispatcher, ScheduleTable};

/// Shared state for the gateway server.
pub struct AppState {
    /// Configured task names — the webhook-eligible set, fixed at startup.
    pub tasks: Vec<String>,
    pub schedule: Arc<ScheduleTable>,
    pub dispatcher: Dispatcher,
    pub start_time: std::time::Instant,
}

/// Build the Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/agents/{name}", post(super::routes::trigger_agent))
        .route("/agents", get(super::routes::list_agents))
        .route("/health", get(super::routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_methods(Any)
                .allow_origin(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until the shutdown signal fires. In-flight HTTP requests
/// drain through axum's graceful shutdown; in-flight agent runs drain
/// through `Dispatcher::wait_idle` in the caller.
pub async fn serve(
    state: Arc<AppState>,
    addr: &str,
    mut shutdown: watch::Receiver<bool>,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Gateway listening on http://{addr}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.changed().await;
        })
        .await
}
