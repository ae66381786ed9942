//! Prompt template rendering.
//!
//! Definitions carry a template body with `{period_hours}` and
//! `{period_minutes}` placeholders; both are substituted from the same
//! lookback window so authors can phrase the period either way.

use warden_core::types::TimeWindow;

/// Render a definition's prompt template against a lookback window.
pub fn render(template: &str, window: &TimeWindow) -> String {
    template
        .replace("{period_hours}", &format_period(window.hours))
        .replace("{period_minutes}", &format_period(window.minutes))
}

/// Format a period value without trailing zeros: 1.10 → "1.1", 5.00 → "5".
fn format_period(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_render_hours() {
        let window = TimeWindow::buffered(Duration::from_secs(3600));
        let out = render("logs from the last {period_hours} hours", &window);
        assert_eq!(out, "logs from the last 1.1 hours");
    }

    #[test]
    fn test_render_minutes() {
        let window = TimeWindow::manual_default();
        let out = render("logs from the last {period_minutes} minutes", &window);
        assert_eq!(out, "logs from the last 5 minutes");
    }

    #[test]
    fn test_render_both_placeholders() {
        let window = TimeWindow::buffered(Duration::from_secs(1800));
        let out = render("{period_hours}h / {period_minutes}m", &window);
        assert_eq!(out, "0.55h / 33m");
    }

    #[test]
    fn test_render_without_placeholders() {
        let window = TimeWindow::manual_default();
        assert_eq!(render("no placeholders here", &window), "no placeholders here");
    }
}
