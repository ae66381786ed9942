//! HTTP route handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use warden_core::types::{DispatchOrigin, DispatchRequest, TimeWindow};

use crate::server::AppState;

/// `POST /agents/{name}` — manual trigger.
///
/// 202 for any configured agent (scheduled or not), 404 otherwise. The
/// response is sent before the invocation runs; callers never see runner
/// failures here.
pub async fn trigger_agent(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> StatusCode {
    if !state.tasks.iter().any(|t| t == &name) {
        tracing::warn!("🌐 Trigger for unknown agent '{name}'");
        return StatusCode::NOT_FOUND;
    }

    let window = match state.schedule.interval_of(&name) {
        Some(interval) => TimeWindow::buffered(interval),
        None => TimeWindow::manual_default(),
    };

    tracing::info!("🌐 Manual trigger accepted for '{name}'");
    state.dispatcher.dispatch(DispatchRequest {
        task: name,
        window,
        origin: DispatchOrigin::Manual,
    });

    StatusCode::ACCEPTED
}

/// `GET /health` — liveness and a few counters.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "ok": true,
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "agents": state.tasks.len(),
        "in_flight": state.dispatcher.in_flight(),
    }))
}

/// `GET /agents` — configured agents with schedule state.
pub async fn list_agents(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let snapshot = state.schedule.snapshot();
    let agents: Vec<serde_json::Value> = state
        .tasks
        .iter()
        .map(|name| match snapshot.iter().find(|e| &e.task == name) {
            Some(entry) => serde_json::json!({
                "name": name,
                "scheduled": true,
                "interval_secs": entry.interval.as_secs(),
                "next_run_at": entry.next_run_at.to_rfc3339(),
                "last_run_at": entry.last_run_at.map(|t| t.to_rfc3339()),
            }),
            None => serde_json::json!({
                "name": name,
                "scheduled": false,
            }),
        })
        .collect();

    Json(serde_json::json!({ "agents": agents }))
}
