//! Trigger cadence grammar.
//! Supports: `<positive integer><unit>` with unit m/h/d/w, or the literal
//! `webhook` for tasks that only fire on demand.
//! Example: "30m" = every 30 minutes, "1h" = hourly.
//!
//! Deliberately small — no cron crate dependency.

use std::time::Duration;

use crate::error::{Result, WardenError};

/// How a task is triggered: on a fixed interval, or only via webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencySpec {
    /// Fires every `Duration`, starting immediately at startup.
    Periodic(Duration),
    /// Never scheduled; reachable only through the HTTP trigger.
    ManualOnly,
}

impl FrequencySpec {
    /// Parse a frequency string from a task definition.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(WardenError::Config("empty frequency string".into()));
        }
        if raw == "webhook" {
            return Ok(Self::ManualOnly);
        }

        let Some(unit) = raw.chars().last() else {
            return Err(WardenError::Config("empty frequency string".into()));
        };
        let count_str = &raw[..raw.len() - unit.len_utf8()];
        let count: u64 = count_str.parse().map_err(|_| {
            WardenError::Config(format!(
                "malformed frequency '{raw}' (expected <n><m|h|d|w> or 'webhook')"
            ))
        })?;
        if count == 0 {
            return Err(WardenError::Config(format!(
                "frequency '{raw}' must be a positive interval"
            )));
        }

        let unit_secs = match unit {
            'm' => 60,
            'h' => 3600,
            'd' => 86_400,
            'w' => 604_800,
            other => {
                return Err(WardenError::Config(format!(
                    "unknown frequency unit '{other}' in '{raw}' (use m, h, d or w)"
                )));
            }
        };

        Ok(Self::Periodic(Duration::from_secs(count * unit_secs)))
    }

    /// The fixed interval, if this task is periodically scheduled.
    pub fn interval(&self) -> Option<Duration> {
        match self {
            Self::Periodic(d) => Some(*d),
            Self::ManualOnly => None,
        }
    }

    /// Human-readable form for startup logging.
    pub fn describe(&self) -> String {
        match self {
            Self::Periodic(d) => format!("every {}s", d.as_secs()),
            Self::ManualOnly => "webhook only".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(
            FrequencySpec::parse("1h").unwrap(),
            FrequencySpec::Periodic(Duration::from_secs(3600))
        );
        assert_eq!(
            FrequencySpec::parse("30m").unwrap(),
            FrequencySpec::Periodic(Duration::from_secs(1800))
        );
        assert_eq!(
            FrequencySpec::parse("2d").unwrap(),
            FrequencySpec::Periodic(Duration::from_secs(172_800))
        );
        assert_eq!(
            FrequencySpec::parse("1w").unwrap(),
            FrequencySpec::Periodic(Duration::from_secs(604_800))
        );
    }

    #[test]
    fn test_parse_webhook() {
        assert_eq!(
            FrequencySpec::parse("webhook").unwrap(),
            FrequencySpec::ManualOnly
        );
        assert!(FrequencySpec::parse("webhook").unwrap().interval().is_none());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(FrequencySpec::parse("").is_err());
        assert!(FrequencySpec::parse("   ").is_err());
        assert!(FrequencySpec::parse("0m").is_err());
        assert!(FrequencySpec::parse("-5m").is_err());
        assert!(FrequencySpec::parse("5x").is_err());
        assert!(FrequencySpec::parse("h").is_err());
        assert!(FrequencySpec::parse("1.5h").is_err());
        assert!(FrequencySpec::parse("hourly").is_err());
    }
}
