//! Built-in tools available to watchdog agents.
//!
//! A task definition references tools by name; the registry rejects names
//! not in this catalog at parse time.

pub mod discord_alert;
pub mod html_report;
pub mod server_logs;

pub use discord_alert::DiscordAlertTool;
pub use html_report::HtmlReportTool;
pub use server_logs::ServerLogsTool;

use warden_core::config::ToolsConfig;
use warden_core::traits::Tool;

/// All built-in tools, configured. Each task sees the subset its
/// definition names.
pub fn catalog(config: &ToolsConfig) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(ServerLogsTool::new(&config.log_source_url)),
        Box::new(DiscordAlertTool::new(&config.discord_webhook_url)),
        Box::new(HtmlReportTool::new(&config.report_dir)),
    ]
}

/// Every tool name a definition may reference.
pub fn catalog_names() -> Vec<String> {
    vec![
        "server_logs".into(),
        "discord_alert".into(),
        "html_report".into(),
    ]
}

/// Truncate at a char boundary (UTF-8 safe).
pub(crate) fn safe_truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_match_catalog() {
        let tools = catalog(&ToolsConfig::default());
        let names: Vec<String> = tools.iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, catalog_names());
    }

    #[test]
    fn test_safe_truncate_multibyte() {
        let s = "héllo wörld";
        let cut = safe_truncate(s, 2);
        assert!(cut.len() <= 2);
        assert!(s.starts_with(cut));
    }
}
