//! # Warden Runner
//!
//! The agent invocation behind the trigger engine. One run:
//! 1. Render the definition's prompt template against the lookback window.
//! 2. Send it to an OpenAI-compatible chat endpoint with the task's tools.
//! 3. Execute requested tool calls and feed results back, up to a bounded
//!    number of rounds.
//!
//! The runner holds no per-task state — definitions arrive fresh from the
//! registry on every dispatch, so edits are picked up without a restart.

pub mod chat;
pub mod prompt;
pub mod tools;

use async_trait::async_trait;

use warden_core::config::WardenConfig;
use warden_core::error::{Result, WardenError};
use warden_core::traits::{AgentRunner, Tool};
use warden_core::types::{TaskDefinition, TimeWindow, ToolDefinition, ToolResult};

use crate::chat::{ChatClient, ChatMessage};

/// Production runner: chat completion loop with the built-in tool catalog.
pub struct ChatAgentRunner {
    client: ChatClient,
    default_model: String,
    max_tool_rounds: u32,
    tools: Vec<Box<dyn Tool>>,
}

impl ChatAgentRunner {
    pub fn from_config(config: &WardenConfig) -> Self {
        Self {
            client: ChatClient::new(&config.llm),
            default_model: config.llm.model.clone(),
            max_tool_rounds: config.llm.max_tool_rounds,
            tools: tools::catalog(&config.tools),
        }
    }

    /// The subset of the catalog this task is allowed to call.
    fn tools_for(&self, definition: &TaskDefinition) -> Vec<&dyn Tool> {
        self.tools
            .iter()
            .filter(|t| definition.tools.iter().any(|name| name == t.name()))
            .map(|t| t.as_ref())
            .collect()
    }
}

#[async_trait]
impl AgentRunner for ChatAgentRunner {
    async fn run(&self, definition: &TaskDefinition, window: &TimeWindow) -> Result<()> {
        let model = if definition.model.is_empty() {
            &self.default_model
        } else {
            &definition.model
        };

        let allowed = self.tools_for(definition);
        let tool_defs: Vec<ToolDefinition> = allowed.iter().map(|t| t.definition()).collect();

        let rendered = prompt::render(&definition.prompt_template, window);
        let mut messages = vec![ChatMessage::user(rendered)];

        for round in 0..self.max_tool_rounds {
            let reply = self
                .client
                .complete(model, definition.max_tokens, &messages, &tool_defs)
                .await?;
            let calls = reply.tool_calls.clone().unwrap_or_default();
            messages.push(reply);

            if calls.is_empty() {
                tracing::info!(
                    "🤖 Agent '{}' finished after {} round(s)",
                    definition.name,
                    round + 1
                );
                return Ok(());
            }

            for call in calls {
                let result = match allowed.iter().find(|t| t.name() == call.function.name) {
                    Some(tool) => {
                        tracing::debug!(
                            "🔧 Agent '{}' calling tool '{}'",
                            definition.name,
                            call.function.name
                        );
                        tool.execute(&call.function.arguments)
                            .await
                            .unwrap_or_else(|e| ToolResult {
                                tool_call_id: String::new(),
                                output: format!("Tool failed: {e}"),
                                success: false,
                            })
                    }
                    None => ToolResult {
                        tool_call_id: String::new(),
                        output: format!("Unknown tool '{}'", call.function.name),
                        success: false,
                    },
                };
                if !result.success {
                    tracing::warn!(
                        "⚠️ Tool '{}' for agent '{}': {}",
                        call.function.name,
                        definition.name,
                        result.output
                    );
                }
                messages.push(ChatMessage::tool(call.id, result.output));
            }
        }

        Err(WardenError::Runner(format!(
            "agent '{}' exceeded {} tool rounds",
            definition.name, self.max_tool_rounds
        )))
    }
}
