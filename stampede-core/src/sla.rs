//! Pass/fail thresholds evaluated over a scenario's result set.
use crate::data::ResultSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_FAILURE_PERCENT: &str = "max_failure_percent";
pub const MAX_SECONDS_PER_ITERATION: &str = "max_seconds_per_iteration";
pub const MAX_AVG_DURATION: &str = "max_avg_duration";

/// SLA criteria for one scenario run. Every criterion is optional; an empty
/// config always passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlaConfig {
    /// Highest tolerated share of failed iterations, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_failure_percent: Option<f64>,
    /// Hard cap on any single iteration, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_seconds_per_iteration: Option<f64>,
    /// Cap on the mean duration of successful iterations, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_avg_duration: Option<f64>,
}

impl SlaConfig {
    pub fn is_empty(&self) -> bool {
        self.max_failure_percent.is_none()
            && self.max_seconds_per_iteration.is_none()
            && self.max_avg_duration.is_none()
    }

    /// Evaluate every configured criterion against `results`.
    pub fn check_all(&self, results: &ResultSet) -> SlaReport {
        let mut report = SlaReport::default();

        if let Some(limit) = self.max_failure_percent {
            report.results.push(check_failure_percent(limit, results));
        }
        if let Some(limit) = self.max_seconds_per_iteration {
            report
                .results
                .push(check_seconds_per_iteration(limit, results));
        }
        if let Some(limit) = self.max_avg_duration {
            report.results.push(check_avg_duration(limit, results));
        }

        debug!(
            criteria = report.results.len(),
            passed = report.passed(),
            "evaluated SLA"
        );
        report
    }
}

/// Outcome of a single criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaResult {
    pub criterion: &'static str,
    pub success: bool,
    pub detail: String,
}

/// All criterion outcomes for one scenario run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlaReport {
    pub results: Vec<SlaResult>,
}

impl SlaReport {
    /// True when every evaluated criterion passed (vacuously on none).
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

fn check_failure_percent(limit: f64, results: &ResultSet) -> SlaResult {
    match results.failure_percent() {
        Some(rate) => SlaResult {
            criterion: MAX_FAILURE_PERCENT,
            success: rate <= limit,
            detail: format!(
                "failure rate {:.2}% over {} iteration(s), limit {:.2}%",
                rate,
                results.len(),
                limit
            ),
        },
        None => SlaResult {
            criterion: MAX_FAILURE_PERCENT,
            success: false,
            detail: "no iterations recorded, failure rate undefined".to_string(),
        },
    }
}

fn check_seconds_per_iteration(limit: f64, results: &ResultSet) -> SlaResult {
    // Failed iterations count too: a timeout that errors is still a slow
    // iteration.
    let slowest = results
        .max_duration()
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    SlaResult {
        criterion: MAX_SECONDS_PER_ITERATION,
        success: slowest <= limit,
        detail: format!("slowest iteration {slowest:.3}s, limit {limit:.3}s"),
    }
}

fn check_avg_duration(limit: f64, results: &ResultSet) -> SlaResult {
    match results.mean_duration() {
        Some(mean) => {
            let mean = mean.as_secs_f64();
            SlaResult {
                criterion: MAX_AVG_DURATION,
                success: mean <= limit,
                detail: format!("mean iteration {mean:.3}s, limit {limit:.3}s"),
            }
        }
        // Nothing succeeded, so there is no mean to hold against the cap.
        None => SlaResult {
            criterion: MAX_AVG_DURATION,
            success: true,
            detail: "no successful iterations, mean duration not evaluated".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::IterationResult;
    use std::time::Duration;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn mixed_results() -> ResultSet {
        vec![
            IterationResult::ok(secs(1.0)),
            IterationResult::ok(secs(2.0)),
            IterationResult::ok(secs(3.0)),
            IterationResult::failed(secs(9.0), "no valid host"),
        ]
        .into()
    }

    #[test]
    fn empty_config_always_passes() {
        let report = SlaConfig::default().check_all(&mixed_results());
        assert!(report.passed());
        assert!(report.is_empty());
    }

    #[test]
    fn failure_percent_boundary_is_inclusive() {
        let sla = SlaConfig {
            max_failure_percent: Some(25.0),
            ..Default::default()
        };
        let report = sla.check_all(&mixed_results());
        assert!(report.passed(), "{:?}", report);

        let sla = SlaConfig {
            max_failure_percent: Some(24.9),
            ..Default::default()
        };
        assert!(!sla.check_all(&mixed_results()).passed());
    }

    #[test]
    fn slowest_iteration_includes_failures() {
        let sla = SlaConfig {
            max_seconds_per_iteration: Some(5.0),
            ..Default::default()
        };
        let report = sla.check_all(&mixed_results());
        assert!(!report.passed());
        assert!(report.results[0].detail.contains("9.000s"));
    }

    #[test]
    fn avg_duration_ignores_failures() {
        let sla = SlaConfig {
            max_avg_duration: Some(2.5),
            ..Default::default()
        };
        // Mean over the three successes is 2.0s; the 9s failure is excluded.
        assert!(sla.check_all(&mixed_results()).passed());
    }

    #[test]
    fn empty_results_fail_failure_rate_only() {
        let sla = SlaConfig {
            max_failure_percent: Some(0.0),
            max_seconds_per_iteration: Some(1.0),
            max_avg_duration: Some(1.0),
        };
        let report = sla.check_all(&ResultSet::new());
        assert!(!report.passed());

        let by_name: Vec<_> = report
            .results
            .iter()
            .map(|r| (r.criterion, r.success))
            .collect();
        assert_eq!(
            by_name,
            [
                (MAX_FAILURE_PERCENT, false),
                (MAX_SECONDS_PER_ITERATION, true),
                (MAX_AVG_DURATION, true),
            ]
        );
    }

    #[tracing_test::traced_test]
    #[test]
    fn all_criteria_reported() {
        let sla = SlaConfig {
            max_failure_percent: Some(50.0),
            max_seconds_per_iteration: Some(10.0),
            max_avg_duration: Some(0.5),
        };
        let report = sla.check_all(&mixed_results());
        assert_eq!(report.results.len(), 3);
        assert!(!report.passed());
        assert!(logs_contain("evaluated SLA"));
    }
}
