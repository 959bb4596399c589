use crate::constants::{DEFAULT_CONCURRENCY, DEFAULT_TIMES};
use crate::context::ContextSet;
use crate::sla::SlaConfig;
use crate::timings::TimingOverrides;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DurationSeconds};
use std::collections::BTreeMap;
use std::time::Duration;

/// A parsed benchmark task document.
///
/// Top-level keys are scenario names in `Group.operation` form, each mapping
/// to one or more runs of that scenario with independent arguments, cadence,
/// context requirements and thresholds. The optional `timings` section tunes
/// per-operation polling cadence for the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    #[serde(default, skip_serializing_if = "TimingOverrides::is_empty")]
    pub timings: TimingOverrides,
    #[serde(flatten)]
    scenarios: BTreeMap<String, Vec<ScenarioRun>>,
}

impl TaskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    /// Runs declared for a scenario; empty when the document never names it.
    pub fn runs_for(&self, name: &str) -> &[ScenarioRun] {
        self.scenarios.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ScenarioRun])> {
        self.scenarios.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    pub fn total_runs(&self) -> usize {
        self.scenarios.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, runs: Vec<ScenarioRun>) {
        self.scenarios.insert(name.into(), runs);
    }
}

/// One run of a scenario: arguments plus the three optional sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioRun {
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub args: Map<String, Value>,
    pub runner: RunnerConfig,
    #[serde(skip_serializing_if = "ContextSet::is_default")]
    pub context: ContextSet,
    #[serde(skip_serializing_if = "SlaConfig::is_empty")]
    pub sla: SlaConfig,
}

impl ScenarioRun {
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }
}

/// Execution cadence for a scenario run, tagged by `type` in the document.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunnerConfig {
    /// One iteration after another from a single worker.
    Serial {
        #[serde(default = "default_times")]
        times: u32,
    },
    /// A fixed pool of concurrent workers sharing an iteration budget.
    Constant {
        #[serde(default = "default_times")]
        times: u32,
        #[serde(default = "default_concurrency")]
        concurrency: u32,
    },
    /// Iterations launched at a fixed rate, regardless of completion.
    Rps {
        #[serde(default = "default_times")]
        times: u32,
        rps: u32,
    },
    /// A fixed pool of workers iterating until the clock runs out.
    ConstantForDuration {
        #[serde(default = "default_concurrency")]
        concurrency: u32,
        #[serde_as(as = "DurationSeconds<u64>")]
        duration: Duration,
    },
}

impl RunnerConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            RunnerConfig::Serial { .. } => "serial",
            RunnerConfig::Constant { .. } => "constant",
            RunnerConfig::Rps { .. } => "rps",
            RunnerConfig::ConstantForDuration { .. } => "constant_for_duration",
        }
    }

    /// Total iteration budget; `None` when the runner is bounded by a clock
    /// instead of a count.
    pub fn iterations(&self) -> Option<u32> {
        match self {
            RunnerConfig::Serial { times }
            | RunnerConfig::Constant { times, .. }
            | RunnerConfig::Rps { times, .. } => Some(*times),
            RunnerConfig::ConstantForDuration { .. } => None,
        }
    }

    /// Size of the worker pool; `None` when iterations are launched by rate
    /// rather than drawn from a pool.
    pub fn concurrency(&self) -> Option<u32> {
        match self {
            RunnerConfig::Serial { .. } => Some(1),
            RunnerConfig::Constant { concurrency, .. }
            | RunnerConfig::ConstantForDuration { concurrency, .. } => Some(*concurrency),
            RunnerConfig::Rps { .. } => None,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig::Serial {
            times: DEFAULT_TIMES,
        }
    }
}

fn default_times() -> u32 {
    DEFAULT_TIMES
}

fn default_concurrency() -> u32 {
    DEFAULT_CONCURRENCY
}
