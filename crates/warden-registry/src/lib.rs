//! # Warden Registry
//!
//! Task definition lookup. Each agent lives in `<agents_dir>/<name>.md`:
//! a TOML frontmatter block between `---` lines, then the prompt template
//! body.
//!
//! ```text
//! ---
//! frequency = "1h"
//! tools = ["server_logs", "discord_alert"]
//! ---
//! Fetch the server logs for the last {period_hours} hours...
//! ```
//!
//! Lookups re-read the file every time — no caching — so edits to a
//! definition land on the task's next dispatch without a restart.

use std::path::PathBuf;

use serde::Deserialize;

use warden_core::error::{Result, WardenError};
use warden_core::frequency::FrequencySpec;
use warden_core::types::TaskDefinition;

/// Frontmatter header of a definition file.
#[derive(Debug, Deserialize)]
struct Frontmatter {
    frequency: String,
    #[serde(default)]
    tools: Vec<String>,
    /// Empty means "use the configured default model".
    #[serde(default)]
    model: String,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
}

fn default_max_tokens() -> u32 { 4096 }

/// Read-through registry over a directory of agent definition files.
pub struct TaskRegistry {
    agents_dir: PathBuf,
    known_tools: Vec<String>,
}

impl TaskRegistry {
    pub fn new(agents_dir: impl Into<PathBuf>, known_tools: Vec<String>) -> Self {
        Self {
            agents_dir: agents_dir.into(),
            known_tools,
        }
    }

    /// Fetch the current definition for `name` from disk.
    ///
    /// Errors: `TaskNotFound` when the file is missing, `Config` for a
    /// malformed definition (bad frontmatter, unparseable frequency,
    /// unknown tool reference, empty prompt body).
    pub fn lookup(&self, name: &str) -> Result<TaskDefinition> {
        let path = self.agents_dir.join(format!("{name}.md"));
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WardenError::TaskNotFound(name.to_string())
            } else {
                WardenError::Io(e)
            }
        })?;

        let (header, body) = split_frontmatter(&content).ok_or_else(|| {
            WardenError::Config(format!(
                "agent '{name}': missing or unterminated frontmatter block"
            ))
        })?;

        let fm: Frontmatter = toml::from_str(header)
            .map_err(|e| WardenError::Config(format!("agent '{name}': bad frontmatter: {e}")))?;

        let frequency = FrequencySpec::parse(&fm.frequency)
            .map_err(|e| WardenError::Config(format!("agent '{name}': {e}")))?;

        for tool in &fm.tools {
            if !self.known_tools.iter().any(|t| t == tool) {
                return Err(WardenError::Config(format!(
                    "agent '{name}': unknown tool '{tool}' (available: {})",
                    self.known_tools.join(", ")
                )));
            }
        }

        let prompt_template = body.trim().to_string();
        if prompt_template.is_empty() {
            return Err(WardenError::Config(format!(
                "agent '{name}': empty prompt body"
            )));
        }

        Ok(TaskDefinition {
            name: name.to_string(),
            frequency,
            tools: fm.tools,
            model: fm.model,
            max_tokens: fm.max_tokens,
            prompt_template,
        })
    }
}

/// Split `---\n<toml>\n---\n<body>` into (toml, body).
fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest.strip_prefix('\n')?;
    let end = rest.find("\n---")?;
    let header = &rest[..end];
    let body = &rest[end + 4..];
    Some((header, body.strip_prefix('\n').unwrap_or(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn known_tools() -> Vec<String> {
        vec![
            "server_logs".into(),
            "discord_alert".into(),
            "html_report".into(),
        ]
    }

    fn write_agent(dir: &std::path::Path, name: &str, content: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(format!("{name}.md")), content).unwrap();
    }

    #[test]
    fn test_lookup_valid_definition() {
        let dir = std::env::temp_dir().join("warden-test-registry-valid");
        write_agent(
            &dir,
            "server-watch",
            "---\nfrequency = \"1h\"\ntools = [\"server_logs\"]\nmax_tokens = 2048\n---\nAnalyze the last {period_hours} hours of logs.\n",
        );

        let registry = TaskRegistry::new(&dir, known_tools());
        let def = registry.lookup("server-watch").unwrap();
        assert_eq!(def.name, "server-watch");
        assert_eq!(
            def.frequency,
            FrequencySpec::Periodic(Duration::from_secs(3600))
        );
        assert_eq!(def.tools, vec!["server_logs"]);
        assert_eq!(def.max_tokens, 2048);
        assert!(def.prompt_template.contains("{period_hours}"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_lookup_missing_file() {
        let dir = std::env::temp_dir().join("warden-test-registry-missing");
        std::fs::create_dir_all(&dir).unwrap();
        let registry = TaskRegistry::new(&dir, known_tools());
        assert!(matches!(
            registry.lookup("ghost"),
            Err(WardenError::TaskNotFound(name)) if name == "ghost"
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_lookup_bad_frontmatter() {
        let dir = std::env::temp_dir().join("warden-test-registry-badfm");
        write_agent(&dir, "broken", "---\nfrequency = [not toml\n---\nbody\n");
        let registry = TaskRegistry::new(&dir, known_tools());
        assert!(matches!(
            registry.lookup("broken"),
            Err(WardenError::Config(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_lookup_no_frontmatter() {
        let dir = std::env::temp_dir().join("warden-test-registry-nofm");
        write_agent(&dir, "plain", "just a prompt, no header\n");
        let registry = TaskRegistry::new(&dir, known_tools());
        assert!(matches!(
            registry.lookup("plain"),
            Err(WardenError::Config(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_lookup_unknown_tool() {
        let dir = std::env::temp_dir().join("warden-test-registry-badtool");
        write_agent(
            &dir,
            "tooly",
            "---\nfrequency = \"1h\"\ntools = [\"time_machine\"]\n---\nbody\n",
        );
        let registry = TaskRegistry::new(&dir, known_tools());
        let err = registry.lookup("tooly").unwrap_err();
        assert!(err.to_string().contains("time_machine"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_lookup_bad_frequency() {
        let dir = std::env::temp_dir().join("warden-test-registry-badfreq");
        write_agent(&dir, "freaky", "---\nfrequency = \"fortnightly\"\n---\nbody\n");
        let registry = TaskRegistry::new(&dir, known_tools());
        assert!(matches!(
            registry.lookup("freaky"),
            Err(WardenError::Config(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_lookup_empty_body() {
        let dir = std::env::temp_dir().join("warden-test-registry-nobody");
        write_agent(&dir, "hollow", "---\nfrequency = \"1h\"\n---\n\n");
        let registry = TaskRegistry::new(&dir, known_tools());
        assert!(matches!(
            registry.lookup("hollow"),
            Err(WardenError::Config(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_lookup_rereads_on_every_call() {
        let dir = std::env::temp_dir().join("warden-test-registry-fresh");
        write_agent(&dir, "fresh", "---\nfrequency = \"1h\"\n---\nold prompt\n");
        let registry = TaskRegistry::new(&dir, known_tools());
        assert_eq!(registry.lookup("fresh").unwrap().prompt_template, "old prompt");

        write_agent(&dir, "fresh", "---\nfrequency = \"30m\"\n---\nnew prompt\n");
        let def = registry.lookup("fresh").unwrap();
        assert_eq!(def.prompt_template, "new prompt");
        assert_eq!(
            def.frequency,
            FrequencySpec::Periodic(Duration::from_secs(1800))
        );
        std::fs::remove_dir_all(&dir).ok();
    }
}
