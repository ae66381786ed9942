//! # Warden Scheduler
//!
//! The trigger engine: decides when each configured agent runs and
//! guarantees no two invocations of the same agent overlap.
//!
//! ## Architecture
//! ```text
//! Scheduler loop (tokio interval)          Gateway (HTTP trigger)
//!   └── due periodic tasks ──┐               └── manual requests ──┐
//!                            ▼                                     ▼
//!                        Dispatcher ── ExecutionGuard (per-task state)
//!                            │   Idle          → launch invocation
//!                            │   busy + tick   → drop, log skip
//!                            │   busy + manual → queue (one slot)
//!                            ▼
//!                        AgentRunner (outside any lock)
//! ```
//!
//! No persistence — a restart re-derives "run immediately" for every
//! periodic task.

pub mod dispatch;
pub mod engine;
pub mod guard;
pub mod table;

pub use dispatch::Dispatcher;
pub use engine::run_scheduler;
pub use guard::{Admission, ExecutionGuard};
pub use table::{ScheduleEntry, ScheduleTable};
