//! Config-pure validation of task documents.
//!
//! Validation never touches a platform API: it checks a document against the
//! scenario catalog, the structural bounds of each section, and the set of
//! services the target environment declares.
use crate::catalog::{Catalog, Service};
use serde::Serialize;
use serde_json::Value;
use stampede_core::{
    parse_cidr, ContextSet, RunnerConfig, ScenarioRun, SlaConfig, TaskConfig, TimingOverrides,
    TimingTable, COMPUTE_QUOTA_KEYS, NETWORK_QUOTA_KEYS, UNLIMITED_QUOTA,
};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
#[allow(unused_imports)]
use tracing::{debug, instrument, warn};

/// Outcome of a single validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub msg: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            msg: None,
        }
    }

    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            msg: Some(msg.into()),
        }
    }
}

/// An argument/context check attached to a scenario descriptor.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Closed-interval numeric check on an argument.
    Number {
        param: &'static str,
        min: Option<f64>,
        max: Option<f64>,
        nullable: bool,
        integer_only: bool,
    },
    /// Arguments that must be present.
    RequiredParams(&'static [&'static str]),
    /// Context sections that must be present.
    RequiredContexts(&'static [&'static str]),
}

impl Validator {
    /// An optional integer argument that must be >= 1 when given.
    pub fn positive_int(param: &'static str) -> Self {
        Validator::Number {
            param,
            min: Some(1.0),
            max: None,
            nullable: true,
            integer_only: true,
        }
    }

    /// An optional number argument that must be >= 0 when given.
    pub fn non_negative(param: &'static str) -> Self {
        Validator::Number {
            param,
            min: Some(0.0),
            max: None,
            nullable: true,
            integer_only: false,
        }
    }

    pub fn check(&self, run: &ScenarioRun) -> ValidationResult {
        match self {
            Validator::Number {
                param,
                min,
                max,
                nullable,
                integer_only,
            } => check_number(run, param, *min, *max, *nullable, *integer_only),
            Validator::RequiredParams(params) => {
                let missing: Vec<_> = params
                    .iter()
                    .filter(|p| !run.args.contains_key(**p))
                    .copied()
                    .collect();
                if missing.is_empty() {
                    ValidationResult::ok()
                } else {
                    ValidationResult::fail(format!(
                        "missing required argument(s): {}",
                        missing.join(", ")
                    ))
                }
            }
            Validator::RequiredContexts(names) => {
                let missing: Vec<_> = names
                    .iter()
                    .filter(|n| !run.context.has(n))
                    .copied()
                    .collect();
                if missing.is_empty() {
                    ValidationResult::ok()
                } else {
                    ValidationResult::fail(format!(
                        "missing required context(s): {}",
                        missing.join(", ")
                    ))
                }
            }
        }
    }
}

fn check_number(
    run: &ScenarioRun,
    param: &str,
    min: Option<f64>,
    max: Option<f64>,
    nullable: bool,
    integer_only: bool,
) -> ValidationResult {
    let value = match run.arg(param) {
        None | Some(Value::Null) if nullable => return ValidationResult::ok(),
        None | Some(Value::Null) => {
            return ValidationResult::fail(format!("argument {param} is not specified"))
        }
        Some(value) => value,
    };

    if integer_only && value.as_i64().is_none() && value.as_u64().is_none() {
        return ValidationResult::fail(format!("argument {param} is {value}, not an integer"));
    }

    let number = match value.as_f64() {
        Some(n) => n,
        None => {
            return ValidationResult::fail(format!("argument {param} is {value}, not a number"))
        }
    };

    if let Some(min) = min {
        if number < min {
            return ValidationResult::fail(format!(
                "argument {param} is {number}, less than the minimum ({min})"
            ));
        }
    }
    if let Some(max) = max {
        if number > max {
            return ValidationResult::fail(format!(
                "argument {param} is {number}, greater than the maximum ({max})"
            ));
        }
    }
    ValidationResult::ok()
}

/// What the target environment offers. Scenarios whose service is absent
/// fail validation before the engine ever schedules them.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationProfile {
    services: BTreeSet<Service>,
}

impl ValidationProfile {
    /// A profile offering every known service.
    pub fn all() -> Self {
        Self {
            services: Service::ALL.into_iter().collect(),
        }
    }

    pub fn with_services(services: impl IntoIterator<Item = Service>) -> Self {
        Self {
            services: services.into_iter().collect(),
        }
    }

    pub fn offers(&self, service: Service) -> bool {
        self.services.contains(&service)
    }
}

impl Default for ValidationProfile {
    fn default() -> Self {
        Self::all()
    }
}

/// One validation failure, anchored to a document location such as
/// `ComputeServers.boot_server[0]` or `timings.boot`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub location: String,
    pub message: String,
}

/// Every failure found in one document. Validation never short-circuits so
/// a report lists all problems at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskReport {
    pub failures: Vec<Failure>,
}

impl TaskReport {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    fn push(&mut self, location: impl Into<String>, message: impl Into<String>) {
        self.failures.push(Failure {
            location: location.into(),
            message: message.into(),
        });
    }
}

impl fmt::Display for TaskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "{}: {}", failure.location, failure.message)?;
        }
        Ok(())
    }
}

/// Validate a whole document against the catalog and an environment profile.
#[instrument(skip_all, fields(scenarios = config.scenario_count()))]
pub fn validate_task(
    config: &TaskConfig,
    catalog: &Catalog,
    profile: &ValidationProfile,
) -> TaskReport {
    let mut report = TaskReport::default();

    validate_timings(&config.timings, &mut report);

    for (name, runs) in config.iter() {
        let descriptor = match catalog.get(name) {
            Some(descriptor) => descriptor,
            None => {
                report.push(name, "unknown scenario");
                continue;
            }
        };

        if let Some(service) = descriptor.service() {
            if !profile.offers(service) {
                report.push(name, format!("service not offered: {service}"));
            }
        }

        for (idx, run) in runs.iter().enumerate() {
            let location = format!("{name}[{idx}]");
            validate_runner(&run.runner, &location, &mut report);
            validate_context(&run.context, &location, &mut report);
            validate_sla(&run.sla, &location, &mut report);

            for validator in descriptor.validators() {
                let result = validator.check(run);
                if !result.is_valid {
                    report.push(
                        location.clone(),
                        result.msg.unwrap_or_else(|| "invalid arguments".to_string()),
                    );
                }
            }
        }
    }

    if report.is_valid() {
        debug!("task document is valid");
    } else {
        warn!(failures = report.failures.len(), "task document is invalid");
    }
    report
}

fn validate_runner(runner: &RunnerConfig, location: &str, report: &mut TaskReport) {
    let location = format!("{location}.runner");

    if let Some(times) = runner.iterations() {
        if times == 0 {
            report.push(location.clone(), "times must be at least 1");
        }
    }
    if let Some(concurrency) = runner.concurrency() {
        if concurrency == 0 {
            report.push(location.clone(), "concurrency must be at least 1");
        }
    }

    match runner {
        RunnerConfig::Constant { times, concurrency } => {
            if *concurrency > *times && *times > 0 {
                report.push(
                    location,
                    format!("concurrency ({concurrency}) exceeds the iteration budget ({times})"),
                );
            }
        }
        RunnerConfig::Rps { rps, .. } => {
            if *rps == 0 {
                report.push(location, "rps must be at least 1");
            }
        }
        RunnerConfig::ConstantForDuration { duration, .. } => {
            if duration.is_zero() {
                report.push(location, "duration must be longer than 0s");
            }
        }
        RunnerConfig::Serial { .. } => {}
    }
}

fn validate_context(context: &ContextSet, location: &str, report: &mut TaskReport) {
    let users = &context.users;
    if users.tenants == 0 {
        report.push(format!("{location}.context.users"), "tenants must be at least 1");
    }
    if users.users_per_tenant == 0 {
        report.push(
            format!("{location}.context.users"),
            "users_per_tenant must be at least 1",
        );
    }
    if users.concurrent == 0 {
        report.push(
            format!("{location}.context.users"),
            "concurrent must be at least 1",
        );
    }
    if let Some(subnet) = &users.network_subnet {
        if let Err(err) = parse_cidr(subnet) {
            report.push(format!("{location}.context.users"), err.to_string());
        }
    }

    if let Some(quotas) = &context.quotas {
        check_quota_map(
            &quotas.compute,
            COMPUTE_QUOTA_KEYS,
            &format!("{location}.context.quotas.compute"),
            report,
        );
        check_quota_map(
            &quotas.network,
            NETWORK_QUOTA_KEYS,
            &format!("{location}.context.quotas.network"),
            report,
        );
    }

    if let Some(network) = &context.network {
        let location = format!("{location}.context.network");
        if network.networks_per_tenant == 0 {
            report.push(location.clone(), "networks_per_tenant must be at least 1");
        } else if let Err(err) = network.cidr_plan(users.tenants) {
            report.push(location, err.to_string());
        }
    }
}

fn check_quota_map(
    quotas: &std::collections::BTreeMap<String, i64>,
    known: &[&str],
    location: &str,
    report: &mut TaskReport,
) {
    for (key, value) in quotas {
        if !known.contains(&key.as_str()) {
            report.push(location.to_string(), format!("unknown quota: {key}"));
        }
        if *value < UNLIMITED_QUOTA {
            report.push(
                location.to_string(),
                format!("quota {key} is {value}; use {UNLIMITED_QUOTA} for unlimited"),
            );
        }
    }
}

fn validate_sla(sla: &SlaConfig, location: &str, report: &mut TaskReport) {
    let location = format!("{location}.sla");

    if let Some(percent) = sla.max_failure_percent {
        if !(0.0..=100.0).contains(&percent) {
            report.push(
                location.clone(),
                format!("max_failure_percent is {percent}, outside [0, 100]"),
            );
        }
    }
    for (name, value) in [
        ("max_seconds_per_iteration", sla.max_seconds_per_iteration),
        ("max_avg_duration", sla.max_avg_duration),
    ] {
        if let Some(value) = value {
            if !value.is_finite() || value <= 0.0 {
                report.push(
                    location.clone(),
                    format!("{name} is {value}, must be a positive number of seconds"),
                );
            }
        }
    }
}

fn validate_timings(overrides: &TimingOverrides, report: &mut TaskReport) {
    for (operation, over) in overrides.iter() {
        let location = format!("timings.{operation}");
        if !TimingTable::is_known(operation) {
            report.push(location, "unknown operation");
            continue;
        }
        if over.timeout == Some(Duration::ZERO) {
            report.push(location.clone(), "timeout must be longer than 0s");
        }
        if over.poll_interval == Some(Duration::ZERO) {
            report.push(location, "poll_interval must be longer than 0s");
        }
    }
}
