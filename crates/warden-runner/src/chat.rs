//! OpenAI-compatible chat client.
//!
//! One client covers every OpenAI-compatible endpoint (Anthropic, OpenAI,
//! OpenRouter, local servers); endpoints differ only by base URL and key.

use serde::{Deserialize, Serialize};
use serde_json::json;

use warden_core::config::LlmConfig;
use warden_core::error::{Result, WardenError};
use warden_core::types::ToolDefinition;

/// A chat message in provider wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// A tool result message answering a specific tool call.
    pub fn tool(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            role: "tool".into(),
            content: Some(output.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// A tool call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "default_call_type")]
    pub call_type: String,
    pub function: FunctionCall,
}

fn default_call_type() -> String { "function".into() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments object.
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Thin client over `POST {endpoint}/chat/completions`.
pub struct ChatClient {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl ChatClient {
    /// API key resolution: config value > WARDEN_API_KEY > ANTHROPIC_API_KEY.
    pub fn new(config: &LlmConfig) -> Self {
        let api_key = if !config.api_key.is_empty() {
            config.api_key.clone()
        } else {
            std::env::var("WARDEN_API_KEY")
                .or_else(|_| std::env::var("ANTHROPIC_API_KEY"))
                .unwrap_or_default()
        };

        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// One completion round. Returns the assistant message, which may carry
    /// tool calls for the caller to execute.
    pub async fn complete(
        &self,
        model: &str,
        max_tokens: u32,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatMessage> {
        let url = format!("{}/chat/completions", self.endpoint);

        let mut body = json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": messages,
        });
        if !tools.is_empty() {
            body["tools"] = tools
                .iter()
                .map(|t| {
                    json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect::<Vec<_>>()
                .into();
        }

        let mut req = self
            .client
            .post(&url)
            .json(&body)
            .timeout(std::time::Duration::from_secs(180));
        if !self.api_key.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let resp = req
            .send()
            .await
            .map_err(|e| WardenError::Runner(format!("chat request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(WardenError::Runner(format!(
                "provider error {status}: {body}"
            )));
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| WardenError::Runner(format!("bad provider response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| WardenError::Runner("provider returned no choices".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tool_call_response() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "server_logs",
                            "arguments": "{\"hours\": 1.1}"
                        }
                    }]
                }
            }]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let msg = &parsed.choices[0].message;
        assert!(msg.content.is_none());
        let calls = msg.tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.name, "server_logs");
    }

    #[test]
    fn test_serialize_tool_message_skips_empty_fields() {
        let msg = ChatMessage::tool("call_1", "3 log lines");
        let raw = serde_json::to_string(&msg).unwrap();
        assert!(raw.contains("\"tool_call_id\":\"call_1\""));
        assert!(!raw.contains("tool_calls"));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let config = LlmConfig {
            endpoint: "https://api.example.com/v1/".into(),
            api_key: "k".into(),
            ..LlmConfig::default()
        };
        let client = ChatClient::new(&config);
        assert_eq!(client.endpoint, "https://api.example.com/v1");
    }
}
