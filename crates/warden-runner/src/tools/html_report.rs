//! HTML report tool — archive the full analysis to disk.

use async_trait::async_trait;
use chrono::Utc;

use warden_core::error::{Result, WardenError};
use warden_core::traits::Tool;
use warden_core::types::{ToolDefinition, ToolResult};

pub struct HtmlReportTool {
    report_dir: String,
}

impl HtmlReportTool {
    pub fn new(report_dir: &str) -> Self {
        Self {
            report_dir: report_dir.to_string(),
        }
    }
}

#[async_trait]
impl Tool for HtmlReportTool {
    fn name(&self) -> &str {
        "html_report"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "html_report".into(),
            description: "Save the full analysis report as an HTML file for archival.".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Report title, used in the filename"
                    },
                    "html": {
                        "type": "string",
                        "description": "Complete HTML document body"
                    }
                },
                "required": ["title", "html"]
            }),
        }
    }

    async fn execute(&self, arguments: &str) -> Result<ToolResult> {
        let args: serde_json::Value = serde_json::from_str(arguments)
            .map_err(|e| WardenError::Tool(e.to_string()))?;
        let title = args["title"]
            .as_str()
            .ok_or_else(|| WardenError::Tool("Missing 'title'".into()))?;
        let html = args["html"]
            .as_str()
            .ok_or_else(|| WardenError::Tool("Missing 'html'".into()))?;

        let dir = shellexpand::tilde(&self.report_dir).to_string();
        std::fs::create_dir_all(&dir)?;

        let filename = format!("{}-{}.html", slug(title), Utc::now().format("%Y%m%d-%H%M%S"));
        let path = std::path::Path::new(&dir).join(filename);
        std::fs::write(&path, html)?;

        tracing::info!("📄 Report saved: {}", path.display());
        Ok(ToolResult {
            tool_call_id: String::new(),
            output: format!("Report saved to {}", path.display()),
            success: true,
        })
    }
}

/// Filename-safe slug: lowercase alphanumerics, runs of anything else
/// collapsed to single dashes.
fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    let out = out.trim_end_matches('-').to_string();
    if out.is_empty() { "report".into() } else { out }
}
