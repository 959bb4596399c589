use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSecondsWithFrac};
use std::time::Duration;

/// One iteration record emitted by the engine.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IterationResult {
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IterationResult {
    pub fn ok(duration: Duration) -> Self {
        Self {
            duration,
            error: None,
        }
    }

    pub fn failed(duration: Duration, error: impl Into<String>) -> Self {
        Self {
            duration,
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// All iteration records for one scenario run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    iterations: Vec<IterationResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: IterationResult) {
        self.iterations.push(result);
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IterationResult> {
        self.iterations.iter()
    }

    pub fn failure_count(&self) -> usize {
        self.iterations.iter().filter(|i| i.is_failure()).count()
    }

    /// Share of failed iterations, in percent. `None` on an empty set since
    /// a rate over zero iterations is meaningless.
    pub fn failure_percent(&self) -> Option<f64> {
        if self.iterations.is_empty() {
            return None;
        }
        Some(self.failure_count() as f64 * 100.0 / self.iterations.len() as f64)
    }

    pub fn max_duration(&self) -> Option<Duration> {
        self.iterations.iter().map(|i| i.duration).max()
    }

    /// Mean duration over successful iterations only.
    pub fn mean_duration(&self) -> Option<Duration> {
        let durations: Vec<f64> = self
            .iterations
            .iter()
            .filter(|i| !i.is_failure())
            .map(|i| i.duration.as_secs_f64())
            .collect();
        if durations.is_empty() {
            return None;
        }
        Some(Duration::from_secs_f64(statistical::mean(&durations)))
    }
}

impl FromIterator<IterationResult> for ResultSet {
    fn from_iter<T: IntoIterator<Item = IterationResult>>(iter: T) -> Self {
        Self {
            iterations: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<IterationResult>> for ResultSet {
    fn from(iterations: Vec<IterationResult>) -> Self {
        Self { iterations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn counts_failures() {
        let set: ResultSet = vec![
            IterationResult::ok(secs(1.0)),
            IterationResult::failed(secs(0.5), "timed out"),
            IterationResult::ok(secs(2.0)),
            IterationResult::failed(secs(0.1), "conflict"),
        ]
        .into();

        assert_eq!(set.len(), 4);
        assert_eq!(set.failure_count(), 2);
        assert_eq!(set.failure_percent(), Some(50.0));
    }

    #[test]
    fn empty_set_has_no_rates() {
        let set = ResultSet::new();
        assert_eq!(set.failure_percent(), None);
        assert_eq!(set.max_duration(), None);
        assert_eq!(set.mean_duration(), None);
    }

    #[test]
    fn mean_skips_failed_iterations() {
        let set: ResultSet = vec![
            IterationResult::ok(secs(1.0)),
            IterationResult::ok(secs(3.0)),
            IterationResult::failed(secs(90.0), "timed out"),
        ]
        .into();

        assert_eq!(set.mean_duration(), Some(secs(2.0)));
        assert_eq!(set.max_duration(), Some(secs(90.0)));
    }

    #[test]
    fn deserializes_engine_records() {
        let raw = r#"[
            {"duration": 2.25},
            {"duration": 0.5, "error": "quota exceeded"}
        ]"#;

        let set: ResultSet = serde_json::from_str(raw).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.failure_count(), 1);
        assert_eq!(set.max_duration(), Some(secs(2.25)));
    }
}
