//! Trait seams between the trigger engine and its collaborators.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{TaskDefinition, TimeWindow, ToolDefinition, ToolResult};

/// The opaque agent invocation. Long-running and network-bound; the engine
/// calls it without holding any guard lock.
#[async_trait]
pub trait AgentRunner: Send + Sync {
    async fn run(&self, definition: &TaskDefinition, window: &TimeWindow) -> Result<()>;
}

/// A tool an agent may call during an invocation.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn definition(&self) -> ToolDefinition;

    /// Execute with a JSON-encoded arguments string from the model.
    async fn execute(&self, arguments: &str) -> Result<ToolResult>;
}
