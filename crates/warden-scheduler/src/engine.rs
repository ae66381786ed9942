//! Scheduler loop — the periodic tick that fires due tasks.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use warden_core::types::{DispatchOrigin, DispatchRequest, TimeWindow};

use crate::dispatch::Dispatcher;
use crate::table::ScheduleTable;

/// Run the tick loop until the shutdown signal fires. Dispatch submission
/// is fire-and-forget; the loop never waits on an invocation.
pub async fn run_scheduler(
    table: Arc<ScheduleTable>,
    dispatcher: Dispatcher,
    tick: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::info!(
        "⏰ Scheduler started ({} periodic task(s), tick every {}s)",
        table.len(),
        tick.as_secs()
    );

    let mut interval = tokio::time::interval(tick);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                for (task, task_interval) in table.due_tasks(Utc::now()) {
                    dispatcher.dispatch(DispatchRequest {
                        task,
                        window: TimeWindow::buffered(task_interval),
                        origin: DispatchOrigin::Scheduled,
                    });
                }
            }
            _ = shutdown.changed() => {
                tracing::info!("⏰ Scheduler stopped");
                break;
            }
        }
    }
}
