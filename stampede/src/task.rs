//! Loading task documents and engine result files from disk.
use crate::catalog::Catalog;
use crate::validation::{validate_task, TaskReport, ValidationProfile};
use stampede_core::{ResultSet, TaskConfig, TimingTable};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported task format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    #[error("task failed validation with {} error(s)", .0.failures.len())]
    Invalid(TaskReport),
}

/// A loaded task document: the parsed config plus the effective cadence
/// table (defaults merged with the document's `timings` section).
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub config: TaskConfig,
    pub timings: TimingTable,
}

impl Task {
    fn from_config(config: TaskConfig) -> Self {
        let mut timings = TimingTable::defaults();
        timings.apply(&config.timings);
        Self { config, timings }
    }

    pub fn from_json(raw: &str) -> Result<Self, TaskError> {
        Ok(Self::from_config(serde_json::from_str(raw)?))
    }

    pub fn from_yaml(raw: &str) -> Result<Self, TaskError> {
        Ok(Self::from_config(serde_yaml::from_str(raw)?))
    }

    /// Load a document, dispatching on the file extension.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TaskError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let task = match extension(path).as_deref() {
            Some("json") => Self::from_json(&raw)?,
            Some("yaml") | Some("yml") => Self::from_yaml(&raw)?,
            _ => return Err(TaskError::UnsupportedFormat(path.display().to_string())),
        };
        debug!(
            scenarios = task.config.scenario_count(),
            runs = task.config.total_runs(),
            "loaded task document"
        );
        Ok(task)
    }

    /// Load a document and validate it, failing on the first invalid file.
    pub fn validated(
        path: impl AsRef<Path>,
        catalog: &Catalog,
        profile: &ValidationProfile,
    ) -> Result<Self, TaskError> {
        let task = Self::load(path)?;
        let report = validate_task(&task.config, catalog, profile);
        if report.is_valid() {
            Ok(task)
        } else {
            Err(TaskError::Invalid(report))
        }
    }
}

/// Parse an engine results file: scenario name to iteration records.
pub fn load_results(path: impl AsRef<Path>) -> Result<BTreeMap<String, ResultSet>, TaskError> {
    let raw = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&raw)?)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn json_and_yaml_agree() {
        let json = r#"{
            "Smoke.sleep": [
                {"args": {"sleep": 0.5}, "runner": {"type": "constant", "times": 10, "concurrency": 2}}
            ]
        }"#;
        let yaml = "
Smoke.sleep:
  - args:
      sleep: 0.5
    runner:
      type: constant
      times: 10
      concurrency: 2
";

        let from_json = Task::from_json(json).unwrap();
        let from_yaml = Task::from_yaml(yaml).unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn document_timings_override_defaults() {
        let task = Task::from_json(
            r#"{
                "timings": {"boot": {"timeout": 900}},
                "Smoke.sleep": [{}]
            }"#,
        )
        .unwrap();

        assert_eq!(
            task.timings.get("boot").unwrap().timeout,
            Duration::from_secs(900)
        );
        // Untouched operations keep their defaults.
        assert_eq!(
            task.timings.get("delete").unwrap().timeout,
            Duration::from_secs(300)
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Task::from_json("{"),
            Err(TaskError::Json(_))
        ));
    }
}
