//! Discord alert tool — post an admin alert via webhook.

use async_trait::async_trait;

use warden_core::error::{Result, WardenError};
use warden_core::traits::Tool;
use warden_core::types::{ToolDefinition, ToolResult};

/// Discord message content limit.
const MAX_CONTENT_BYTES: usize = 2000;

pub struct DiscordAlertTool {
    webhook_url: String,
    client: reqwest::Client,
}

impl DiscordAlertTool {
    pub fn new(webhook_url: &str) -> Self {
        Self {
            webhook_url: webhook_url.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Tool for DiscordAlertTool {
    fn name(&self) -> &str {
        "discord_alert"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "discord_alert".into(),
            description: "Post a message to the admin Discord channel. Use a brief status line when all is normal, the full analysis for security concerns.".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "Message text (max 2000 characters)"
                    }
                },
                "required": ["message"]
            }),
        }
    }

    async fn execute(&self, arguments: &str) -> Result<ToolResult> {
        let args: serde_json::Value = serde_json::from_str(arguments)
            .map_err(|e| WardenError::Tool(e.to_string()))?;
        let message = args["message"]
            .as_str()
            .ok_or_else(|| WardenError::Tool("Missing 'message'".into()))?;

        if self.webhook_url.is_empty() {
            return Ok(ToolResult {
                tool_call_id: String::new(),
                output: "Discord webhook not configured (set tools.discord_webhook_url)".into(),
                success: false,
            });
        }

        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({
                "content": super::safe_truncate(message, MAX_CONTENT_BYTES),
            }))
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| WardenError::Tool(format!("Discord send failed: {e}")))?;

        if resp.status().is_success() {
            tracing::info!("✅ Discord alert posted");
            Ok(ToolResult {
                tool_call_id: String::new(),
                output: "Alert posted".into(),
                success: true,
            })
        } else {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            Ok(ToolResult {
                tool_call_id: String::new(),
                output: format!("Discord webhook error {status}: {body}"),
                success: false,
            })
        }
    }
}
