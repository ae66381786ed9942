//! Warden error taxonomy.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WardenError>;

#[derive(Debug, Error)]
pub enum WardenError {
    /// Malformed configuration or task definition. Fatal at startup for any
    /// task in the configured list.
    #[error("Config error: {0}")]
    Config(String),

    /// The named task has no definition file.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// The agent invocation failed. Caught at the dispatcher boundary,
    /// never propagated to the scheduler or HTTP layers.
    #[error("Runner error: {0}")]
    Runner(String),

    /// A tool call inside an invocation failed.
    #[error("Tool error: {0}")]
    Tool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
