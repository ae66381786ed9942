//! # Warden Gateway
//!
//! The on-demand trigger surface:
//! - `POST /agents/{name}` — trigger a configured agent now (202/404).
//!   The response never waits on the invocation.
//! - `GET /agents` — configured agents with schedule state.
//! - `GET /health` — liveness.
//!
//! No authentication at this layer; that belongs to the deployment
//! environment in front of it.

pub mod routes;
pub mod server;

pub use server::{AppState, build_router, serve};
