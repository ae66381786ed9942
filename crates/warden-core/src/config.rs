//! Warden configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, WardenError};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Names of the configured agents. Every name must resolve to a
    /// definition file under `agents_dir` at startup.
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default = "default_agents_dir")]
    pub agents_dir: String,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_agents_dir() -> String { "~/.warden/agents".into() }

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            agents: vec![],
            agents_dir: default_agents_dir(),
            gateway: GatewayConfig::default(),
            scheduler: SchedulerConfig::default(),
            llm: LlmConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl WardenConfig {
    /// Load config from the default path (~/.warden/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WardenError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| WardenError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".warden")
            .join("config.toml")
    }

    /// Get the Warden home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".warden")
    }
}

/// Gateway (HTTP trigger surface) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 { 7070 }
fn default_host() -> String { "127.0.0.1".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Scheduler loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Tick resolution in seconds. Must be finer than the smallest
    /// configured interval to bound dispatch latency.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
}

fn default_tick_secs() -> u64 { 30 }

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { tick_secs: default_tick_secs() }
    }
}

/// LLM provider configuration for the agent runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI-compatible base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key; falls back to WARDEN_API_KEY env var when empty.
    #[serde(default)]
    pub api_key: String,
    /// Default model when a task definition does not name one.
    #[serde(default = "default_model")]
    pub model: String,
    /// Cap on tool → LLM → tool rounds per invocation.
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,
}

fn default_endpoint() -> String { "https://api.anthropic.com/v1".into() }
fn default_model() -> String { "claude-sonnet-4-20250514".into() }
fn default_max_tool_rounds() -> u32 { 8 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            max_tool_rounds: default_max_tool_rounds(),
        }
    }
}

/// Built-in tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Endpoint the `server_logs` tool fetches from.
    #[serde(default)]
    pub log_source_url: String,
    /// Discord webhook the `discord_alert` tool posts to.
    #[serde(default)]
    pub discord_webhook_url: String,
    /// Directory the `html_report` tool writes into.
    #[serde(default = "default_report_dir")]
    pub report_dir: String,
}

fn default_report_dir() -> String { "~/.warden/reports".into() }

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            log_source_url: String::new(),
            discord_webhook_url: String::new(),
            report_dir: default_report_dir(),
        }
    }
}
