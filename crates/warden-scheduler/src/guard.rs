//! Per-task execution guard — the "is it running" state machine.
//!
//! One mutex-wrapped state per configured task name, built once at startup.
//! Distinct tasks contend on nothing; the per-task critical section covers
//! only the state flip, never the invocation itself.

use std::collections::HashMap;
use std::sync::Mutex;

use warden_core::types::{DispatchOrigin, TimeWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Idle,
    Running,
}

#[derive(Debug)]
struct TaskRunState {
    status: RunStatus,
    /// At most one manual trigger remembered while busy. The first one
    /// observed wins; later triggers in the same busy period coalesce.
    pending_manual: Option<TimeWindow>,
}

/// Verdict for a dispatch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Task was idle; the caller must launch the invocation now.
    Launch,
    /// Task busy; the manual window was stored for a follow-up run.
    QueuedManual,
    /// Task busy; the scheduled request is dropped.
    SkippedBusy,
    /// Task busy with a manual request already pending; dropped silently.
    Coalesced,
    /// Not a configured task name.
    Unknown,
}

pub struct ExecutionGuard {
    states: HashMap<String, Mutex<TaskRunState>>,
}

impl ExecutionGuard {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        let states = names
            .into_iter()
            .map(|name| {
                (
                    name,
                    Mutex::new(TaskRunState {
                        status: RunStatus::Idle,
                        pending_manual: None,
                    }),
                )
            })
            .collect();
        Self { states }
    }

    /// Decide what happens to a dispatch request. `Launch` transitions the
    /// task to Running; the caller owns starting the invocation and must
    /// report back through `on_complete`.
    pub fn admit(&self, task: &str, origin: DispatchOrigin, window: TimeWindow) -> Admission {
        let Some(state) = self.states.get(task) else {
            return Admission::Unknown;
        };
        let mut state = state.lock().unwrap_or_else(|e| e.into_inner());

        match state.status {
            RunStatus::Idle => {
                state.status = RunStatus::Running;
                Admission::Launch
            }
            RunStatus::Running => match origin {
                DispatchOrigin::Scheduled => Admission::SkippedBusy,
                DispatchOrigin::Manual => {
                    if state.pending_manual.is_some() {
                        Admission::Coalesced
                    } else {
                        state.pending_manual = Some(window);
                        Admission::QueuedManual
                    }
                }
            },
        }
    }

    /// Report an invocation finished (success or failure). If a manual
    /// window is pending it is consumed and returned — the task stays
    /// Running and the caller must immediately run again with it.
    /// Otherwise the task returns to Idle.
    pub fn on_complete(&self, task: &str) -> Option<TimeWindow> {
        let state = self.states.get(task)?;
        let mut state = state.lock().unwrap_or_else(|e| e.into_inner());

        match state.pending_manual.take() {
            Some(window) => Some(window),
            None => {
                state.status = RunStatus::Idle;
                None
            }
        }
    }

    pub fn is_running(&self, task: &str) -> bool {
        self.states
            .get(task)
            .map(|s| s.lock().unwrap_or_else(|e| e.into_inner()).status == RunStatus::Running)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn guard() -> ExecutionGuard {
        ExecutionGuard::new(["a".to_string()])
    }

    fn window(mins: u64) -> TimeWindow {
        TimeWindow::from_duration(Duration::from_secs(mins * 60))
    }

    #[test]
    fn test_idle_task_launches() {
        let g = guard();
        assert_eq!(
            g.admit("a", DispatchOrigin::Scheduled, window(66)),
            Admission::Launch
        );
        assert!(g.is_running("a"));
    }

    #[test]
    fn test_busy_task_skips_scheduled() {
        let g = guard();
        g.admit("a", DispatchOrigin::Scheduled, window(66));
        assert_eq!(
            g.admit("a", DispatchOrigin::Scheduled, window(66)),
            Admission::SkippedBusy
        );
        // Nothing pending — completion goes straight to Idle.
        assert!(g.on_complete("a").is_none());
        assert!(!g.is_running("a"));
    }

    #[test]
    fn test_busy_task_queues_one_manual() {
        let g = guard();
        g.admit("a", DispatchOrigin::Scheduled, window(66));
        assert_eq!(
            g.admit("a", DispatchOrigin::Manual, window(5)),
            Admission::QueuedManual
        );
        // Second manual in the same busy period coalesces.
        assert_eq!(
            g.admit("a", DispatchOrigin::Manual, window(10)),
            Admission::Coalesced
        );

        // Completion hands back the first stored window; still Running.
        let pending = g.on_complete("a").unwrap();
        assert_eq!(pending, window(5));
        assert!(g.is_running("a"));

        // The follow-up run finishes with nothing pending.
        assert!(g.on_complete("a").is_none());
        assert!(!g.is_running("a"));
    }

    #[test]
    fn test_unknown_task() {
        let g = guard();
        assert_eq!(
            g.admit("ghost", DispatchOrigin::Manual, window(5)),
            Admission::Unknown
        );
        assert!(g.on_complete("ghost").is_none());
    }

    #[test]
    fn test_distinct_tasks_are_independent() {
        let g = ExecutionGuard::new(["a".to_string(), "b".to_string()]);
        assert_eq!(
            g.admit("a", DispatchOrigin::Scheduled, window(66)),
            Admission::Launch
        );
        assert_eq!(
            g.admit("b", DispatchOrigin::Scheduled, window(33)),
            Admission::Launch
        );
        assert!(g.is_running("a"));
        assert!(g.is_running("b"));
    }
}
