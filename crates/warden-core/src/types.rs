//! Engine types — task definitions, lookback windows, dispatch requests.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::frequency::FrequencySpec;

/// A task definition, re-read from its markdown source on every lookup.
/// The engine never mutates it.
#[derive(Debug, Clone)]
pub struct TaskDefinition {
    /// Unique task name (the file stem under the agents directory).
    pub name: String,
    /// Trigger cadence.
    pub frequency: FrequencySpec,
    /// Tool names this task is allowed to call.
    pub tools: Vec<String>,
    /// Model identifier; empty means "use the configured default".
    pub model: String,
    /// Max output tokens for the invocation.
    pub max_tokens: u32,
    /// Prompt template body with `{period_hours}` / `{period_minutes}`
    /// placeholders.
    pub prompt_template: String,
}

/// The lookback period handed to an invocation, as both unit views of one
/// duration so either prompt placeholder can render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub hours: f64,
    pub minutes: f64,
}

impl TimeWindow {
    /// Window for a scheduled task: its interval plus a 10% buffer, so the
    /// analysis overlaps the previous run slightly instead of leaving gaps.
    pub fn buffered(interval: Duration) -> Self {
        Self::from_duration(interval.mul_f64(1.1))
    }

    /// Window for a manual trigger on a task with no periodic schedule.
    pub fn manual_default() -> Self {
        Self::from_duration(Duration::from_secs(300))
    }

    pub fn from_duration(d: Duration) -> Self {
        let secs = d.as_secs_f64();
        Self {
            hours: secs / 3600.0,
            minutes: secs / 60.0,
        }
    }
}

/// Where a dispatch request came from. Determines the busy-task policy:
/// scheduled requests are dropped, manual requests queue (one slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOrigin {
    Scheduled,
    Manual,
}

/// A request that a task's invocation begin. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub task: String,
    pub window: TimeWindow,
    pub origin: DispatchOrigin,
}

/// A tool exposed to the agent, in provider wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the arguments object.
    pub parameters: serde_json::Value,
}

/// Result of one tool execution, fed back into the conversation.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub output: String,
    pub success: bool,
}
