//! Schedule bookkeeping for periodic tasks.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};

use warden_core::types::TaskDefinition;

/// One periodic task's schedule state. Manual-only tasks have no entry.
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    pub task: String,
    pub interval: Duration,
    pub next_run_at: DateTime<Utc>,
    pub last_run_at: Option<DateTime<Utc>>,
}

/// Due-time table. Entries are created once at startup and mutated only by
/// the scheduler loop through `due_tasks`.
pub struct ScheduleTable {
    entries: Mutex<Vec<ScheduleEntry>>,
}

impl ScheduleTable {
    /// Build from the startup-validated definitions. Periodic tasks get
    /// next_run_at = now, so they fire once immediately.
    pub fn from_definitions(definitions: &[TaskDefinition], now: DateTime<Utc>) -> Self {
        let entries = definitions
            .iter()
            .filter_map(|def| {
                def.frequency.interval().map(|interval| ScheduleEntry {
                    task: def.name.clone(),
                    interval,
                    next_run_at: now,
                    last_run_at: None,
                })
            })
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Every task due at `now`, with its interval. Each returned entry is
    /// advanced by one interval *from its previous next_run_at* — a late
    /// tick must not compress the following interval.
    pub fn due_tasks(&self, now: DateTime<Utc>) -> Vec<(String, Duration)> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let mut due = Vec::new();
        for entry in entries.iter_mut() {
            if entry.next_run_at <= now {
                due.push((entry.task.clone(), entry.interval));
                entry.last_run_at = Some(now);
                entry.next_run_at += chrono::Duration::seconds(entry.interval.as_secs() as i64);
            }
        }
        due
    }

    /// Interval for a scheduled task; None for manual-only names.
    pub fn interval_of(&self, task: &str) -> Option<Duration> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .find(|e| e.task == task)
            .map(|e| e.interval)
    }

    /// Read-only copy for introspection (the gateway's agents listing).
    pub fn snapshot(&self) -> Vec<ScheduleEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::frequency::FrequencySpec;

    fn definition(name: &str, frequency: FrequencySpec) -> TaskDefinition {
        TaskDefinition {
            name: name.into(),
            frequency,
            tools: vec![],
            model: String::new(),
            max_tokens: 4096,
            prompt_template: "prompt".into(),
        }
    }

    fn hourly(name: &str) -> TaskDefinition {
        definition(name, FrequencySpec::Periodic(Duration::from_secs(3600)))
    }

    #[test]
    fn test_periodic_tasks_due_immediately_at_startup() {
        let now = Utc::now();
        let table = ScheduleTable::from_definitions(&[hourly("a")], now);
        let due = table.due_tasks(now);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].0, "a");
        assert_eq!(due[0].1, Duration::from_secs(3600));
    }

    #[test]
    fn test_manual_only_tasks_never_scheduled() {
        let now = Utc::now();
        let table = ScheduleTable::from_definitions(
            &[definition("b", FrequencySpec::ManualOnly)],
            now,
        );
        assert!(table.is_empty());
        assert!(table.due_tasks(now + chrono::Duration::days(365)).is_empty());
        assert!(table.interval_of("b").is_none());
    }

    #[test]
    fn test_advance_is_drift_free() {
        let t0 = Utc::now();
        let table = ScheduleTable::from_definitions(&[hourly("a")], t0);

        // Tick observes the due entry 10 minutes late.
        let late = t0 + chrono::Duration::minutes(10);
        assert_eq!(table.due_tasks(late).len(), 1);

        // Next due is exactly t0 + 1h, not late + 1h.
        let snapshot = table.snapshot();
        assert_eq!(snapshot[0].next_run_at, t0 + chrono::Duration::hours(1));
        assert_eq!(snapshot[0].last_run_at, Some(late));

        // Not due again until then.
        assert!(table.due_tasks(t0 + chrono::Duration::minutes(59)).is_empty());
        assert_eq!(table.due_tasks(t0 + chrono::Duration::hours(1)).len(), 1);
    }

    #[test]
    fn test_each_firing_advances_once() {
        let t0 = Utc::now();
        let table = ScheduleTable::from_definitions(&[hourly("a")], t0);

        // Two intervals elapsed before anyone looked: one firing now,
        // the next already due on the following tick. No batching.
        let very_late = t0 + chrono::Duration::hours(2);
        assert_eq!(table.due_tasks(very_late).len(), 1);
        assert_eq!(table.snapshot()[0].next_run_at, t0 + chrono::Duration::hours(1));
        assert_eq!(table.due_tasks(very_late).len(), 1);
        assert_eq!(table.snapshot()[0].next_run_at, t0 + chrono::Duration::hours(2));
    }

    #[test]
    fn test_interval_of() {
        let now = Utc::now();
        let table = ScheduleTable::from_definitions(&[hourly("a")], now);
        assert_eq!(table.interval_of("a"), Some(Duration::from_secs(3600)));
        assert_eq!(table.interval_of("ghost"), None);
    }
}
