//! Per-operation polling cadence the engine applies while waiting on
//! platform resources: a delay before the first status poll, an overall
//! timeout, and the poll interval.
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSecondsWithFrac};
use std::collections::BTreeMap;
use std::time::Duration;

/// Compute operations with tunable cadence, with their default
/// (prepoll delay, timeout, poll interval) in seconds.
pub const COMPUTE_OPERATIONS: &[(&str, f64, f64, f64)] = &[
    ("start", 0.0, 300.0, 1.0),
    ("stop", 0.0, 300.0, 2.0),
    ("boot", 1.0, 300.0, 1.0),
    ("delete", 2.0, 300.0, 2.0),
    ("reboot", 2.0, 300.0, 2.0),
    ("rescue", 2.0, 300.0, 2.0),
    ("unrescue", 2.0, 300.0, 2.0),
    ("suspend", 2.0, 300.0, 2.0),
    ("image_create", 0.0, 300.0, 2.0),
    ("image_delete", 0.0, 300.0, 2.0),
    ("resize", 2.0, 400.0, 5.0),
    ("resize_confirm", 0.0, 200.0, 2.0),
    ("resize_revert", 0.0, 200.0, 2.0),
];

/// Resolved cadence for one operation.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationTimings {
    /// Sleep before the first status poll.
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub prepoll_delay: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub timeout: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub poll_interval: Duration,
}

/// Partial override for one operation, as written in a task document.
#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingOverride {
    #[serde_as(as = "Option<DurationSecondsWithFrac<f64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepoll_delay: Option<Duration>,
    #[serde_as(as = "Option<DurationSecondsWithFrac<f64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    #[serde_as(as = "Option<DurationSecondsWithFrac<f64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval: Option<Duration>,
}

/// The `timings` section of a task document: operation name to override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimingOverrides(BTreeMap<String, TimingOverride>);

impl TimingOverrides {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TimingOverride)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn insert(&mut self, operation: impl Into<String>, over: TimingOverride) {
        self.0.insert(operation.into(), over);
    }
}

/// Effective cadence table: the defaults with document overrides merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingTable {
    entries: BTreeMap<&'static str, OperationTimings>,
}

impl TimingTable {
    pub fn defaults() -> Self {
        let entries = COMPUTE_OPERATIONS
            .iter()
            .map(|&(op, prepoll, timeout, poll)| {
                (
                    op,
                    OperationTimings {
                        prepoll_delay: Duration::from_secs_f64(prepoll),
                        timeout: Duration::from_secs_f64(timeout),
                        poll_interval: Duration::from_secs_f64(poll),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, operation: &str) -> Option<&OperationTimings> {
        self.entries.get(operation)
    }

    pub fn operations(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn is_known(operation: &str) -> bool {
        COMPUTE_OPERATIONS.iter().any(|&(op, ..)| op == operation)
    }

    /// Merge document overrides over the defaults. Overrides for unknown
    /// operations are left unapplied; validation reports them.
    pub fn apply(&mut self, overrides: &TimingOverrides) {
        for (op, over) in overrides.iter() {
            if let Some((key, entry)) = self.entries.get_key_value(op).map(|(k, v)| (*k, *v)) {
                let merged = OperationTimings {
                    prepoll_delay: over.prepoll_delay.unwrap_or(entry.prepoll_delay),
                    timeout: over.timeout.unwrap_or(entry.timeout),
                    poll_interval: over.poll_interval.unwrap_or(entry.poll_interval),
                };
                self.entries.insert(key, merged);
            }
        }
    }
}

impl Default for TimingTable {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_operation() {
        let table = TimingTable::defaults();
        assert_eq!(table.operations().count(), COMPUTE_OPERATIONS.len());

        let boot = table.get("boot").unwrap();
        assert_eq!(boot.prepoll_delay, Duration::from_secs(1));
        assert_eq!(boot.timeout, Duration::from_secs(300));
        assert_eq!(boot.poll_interval, Duration::from_secs(1));

        let resize = table.get("resize").unwrap();
        assert_eq!(resize.timeout, Duration::from_secs(400));
        assert_eq!(resize.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn partial_override_keeps_other_fields() {
        let mut table = TimingTable::defaults();
        let overrides: TimingOverrides =
            serde_json::from_str(r#"{"boot": {"timeout": 600}}"#).unwrap();
        table.apply(&overrides);

        let boot = table.get("boot").unwrap();
        assert_eq!(boot.timeout, Duration::from_secs(600));
        assert_eq!(boot.prepoll_delay, Duration::from_secs(1));
        assert_eq!(boot.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn unknown_operation_is_left_unapplied() {
        let mut table = TimingTable::defaults();
        let mut overrides = TimingOverrides::default();
        overrides.insert(
            "migrate",
            TimingOverride {
                timeout: Some(Duration::from_secs(10)),
                ..Default::default()
            },
        );
        let before = table.clone();
        table.apply(&overrides);
        assert_eq!(table, before);
        assert!(!TimingTable::is_known("migrate"));
    }

    #[test]
    fn override_rejects_unknown_field() {
        let err = serde_json::from_str::<TimingOverride>(r#"{"retries": 3}"#);
        assert!(err.is_err());
    }
}
