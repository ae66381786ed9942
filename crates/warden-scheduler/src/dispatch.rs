//! Dispatch — admits requests through the guard and launches invocations.
//!
//! Submission never waits on a run: the guard flip is the only critical
//! section, and the invocation goes to its own tokio task. Runner failures
//! are logged here and never propagate to the scheduler or HTTP layers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use warden_core::traits::AgentRunner;
use warden_core::types::{DispatchRequest, TimeWindow};
use warden_registry::TaskRegistry;

use crate::guard::{Admission, ExecutionGuard};

/// Cheaply cloneable handle; all clones share one guard and drain counter.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Arc<TaskRegistry>,
    runner: Arc<dyn AgentRunner>,
    guard: ExecutionGuard,
    in_flight: AtomicUsize,
    drained: Notify,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<TaskRegistry>,
        runner: Arc<dyn AgentRunner>,
        guard: ExecutionGuard,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry,
                runner,
                guard,
                in_flight: AtomicUsize::new(0),
                drained: Notify::new(),
            }),
        }
    }

    /// Submit a request. Returns the admission verdict; callers that only
    /// need fire-and-forget can ignore it.
    pub fn dispatch(&self, request: DispatchRequest) -> Admission {
        let admission = self
            .inner
            .guard
            .admit(&request.task, request.origin, request.window);

        match admission {
            Admission::Launch => {
                self.inner.in_flight.fetch_add(1, Ordering::AcqRel);
                let inner = self.inner.clone();
                tokio::spawn(async move {
                    inner.run_to_idle(request.task, request.window).await;
                });
            }
            Admission::SkippedBusy => {
                tracing::warn!(
                    "⚠️ Tick skipped for '{}' — previous run still active",
                    request.task
                );
            }
            Admission::QueuedManual => {
                tracing::info!(
                    "📥 Manual trigger for '{}' queued behind active run",
                    request.task
                );
            }
            Admission::Coalesced => {
                tracing::debug!(
                    "Manual trigger for '{}' coalesced — one already pending",
                    request.task
                );
            }
            Admission::Unknown => {
                tracing::warn!(
                    "⚠️ Dispatch for unconfigured task '{}' dropped",
                    request.task
                );
            }
        }

        admission
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Wait until no invocations are in flight (graceful drain on shutdown).
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.drained.notified();
            if self.inner.in_flight.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Inner {
    /// Run the invocation, then keep consuming the pending manual slot
    /// until the task can go idle.
    async fn run_to_idle(&self, task: String, window: TimeWindow) {
        let mut window = window;
        loop {
            self.invoke(&task, &window).await;
            match self.guard.on_complete(&task) {
                Some(pending) => {
                    tracing::info!("🔁 Running '{}' again for queued manual trigger", task);
                    window = pending;
                }
                None => break,
            }
        }
        if self.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.drained.notify_waiters();
        }
    }

    async fn invoke(&self, task: &str, window: &TimeWindow) {
        // Fresh definition on every run — the registry never caches, so
        // edits land on the next dispatch.
        let definition = match self.registry.lookup(task) {
            Ok(def) => def,
            Err(e) => {
                tracing::warn!("⚠️ Skipping run of '{task}': {e}");
                return;
            }
        };

        tracing::info!("🔔 Invoking agent '{}' (window {:.1}h)", task, window.hours);
        match self.runner.run(&definition, window).await {
            Ok(()) => tracing::info!("✅ Agent '{}' run complete", task),
            Err(e) => tracing::warn!(
                "⚠️ Agent '{}' run failed (window {:.1}h): {e}",
                task,
                window.hours
            ),
        }
    }
}
