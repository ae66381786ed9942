//! Server logs tool — fetch game-server logs for a lookback window.

use async_trait::async_trait;

use warden_core::error::{Result, WardenError};
use warden_core::traits::Tool;
use warden_core::types::{ToolDefinition, ToolResult};

/// Log payloads larger than this are truncated before they reach the model.
const MAX_LOG_BYTES: usize = 120_000;

pub struct ServerLogsTool {
    source_url: String,
    client: reqwest::Client,
}

impl ServerLogsTool {
    pub fn new(source_url: &str) -> Self {
        Self {
            source_url: source_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Tool for ServerLogsTool {
    fn name(&self) -> &str {
        "server_logs"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "server_logs".into(),
            description: "Fetch the game server's logs (server events, chat, kills, admin actions) for a lookback window.".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "hours": {
                        "type": "number",
                        "description": "Lookback window in hours"
                    }
                },
                "required": ["hours"]
            }),
        }
    }

    async fn execute(&self, arguments: &str) -> Result<ToolResult> {
        let args: serde_json::Value = serde_json::from_str(arguments)
            .map_err(|e| WardenError::Tool(e.to_string()))?;
        let hours = args["hours"]
            .as_f64()
            .ok_or_else(|| WardenError::Tool("Missing 'hours'".into()))?;

        if self.source_url.is_empty() {
            return Ok(ToolResult {
                tool_call_id: String::new(),
                output: "Log source not configured (set tools.log_source_url)".into(),
                success: false,
            });
        }

        let url = format!("{}?hours={hours}", self.source_url);
        let resp = self
            .client
            .get(&url)
            .timeout(std::time::Duration::from_secs(30))
            .send()
            .await
            .map_err(|e| WardenError::Tool(format!("Log fetch failed: {e}")))?;

        if !resp.status().is_success() {
            return Ok(ToolResult {
                tool_call_id: String::new(),
                output: format!("Log source error {}", resp.status()),
                success: false,
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| WardenError::Tool(format!("Log read failed: {e}")))?;

        Ok(ToolResult {
            tool_call_id: String::new(),
            output: super::safe_truncate(&body, MAX_LOG_BYTES).to_string(),
            success: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_hours_argument() {
        let tool = ServerLogsTool::new("http://127.0.0.1:1/logs");
        assert!(tool.execute("{}").await.is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_source_fails_softly() {
        let tool = ServerLogsTool::new("");
        let result = tool.execute("{\"hours\": 1.1}").await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("not configured"));
    }
}
