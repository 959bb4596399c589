use crate::cli::Cli;
use anyhow::Context;
use humantime::format_duration;
use serde_json::json;
use stampede::prelude::*;
use std::path::Path;

pub fn run(cli: &Cli, task: Option<&Path>) -> anyhow::Result<bool> {
    match task {
        Some(path) => list_runs(cli, path),
        None => list_catalog(cli),
    }
}

fn list_catalog(cli: &Cli) -> anyhow::Result<bool> {
    let catalog = Catalog::builtin();

    if cli.json {
        let entries: Vec<_> = catalog
            .iter()
            .map(|d| {
                json!({
                    "name": d.name(),
                    "service": d.service(),
                    "description": d.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for descriptor in catalog.iter() {
            let service = descriptor.service().map(|s| s.as_str()).unwrap_or("-");
            println!(
                "{:<55} {:<8} {}",
                descriptor.name(),
                service,
                descriptor.description()
            );
        }
    }

    Ok(true)
}

fn list_runs(cli: &Cli, path: &Path) -> anyhow::Result<bool> {
    let task = Task::load(path).with_context(|| format!("loading {}", path.display()))?;

    if cli.json {
        let mut entries = Vec::new();
        for (name, runs) in task.config.iter() {
            for (idx, run) in runs.iter().enumerate() {
                entries.push(json!({
                    "scenario": name,
                    "run": idx,
                    "runner": &run.runner,
                    "users": run.context.users.total_users(),
                    "sla": run.sla,
                }));
            }
        }
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (name, runs) in task.config.iter() {
            for (idx, run) in runs.iter().enumerate() {
                println!("{name}[{idx}]: {}", describe_runner(&run.runner));
                println!(
                    "  users: {} ({} tenant(s) x {})",
                    run.context.users.total_users(),
                    run.context.users.tenants,
                    run.context.users.users_per_tenant
                );
            }
        }
    }

    Ok(true)
}

fn describe_runner(runner: &RunnerConfig) -> String {
    match runner {
        RunnerConfig::Serial { times } => format!("serial, {times} iteration(s)"),
        RunnerConfig::Constant { times, concurrency } => {
            format!("constant, {times} iteration(s) across {concurrency} worker(s)")
        }
        RunnerConfig::Rps { times, rps } => {
            format!("rps, {times} iteration(s) at {rps}/s")
        }
        RunnerConfig::ConstantForDuration {
            concurrency,
            duration,
        } => format!(
            "constant, {concurrency} worker(s) for {}",
            format_duration(*duration)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn runner_descriptions_are_stable() {
        assert_eq!(
            describe_runner(&RunnerConfig::Serial { times: 5 }),
            "serial, 5 iteration(s)"
        );
        assert_eq!(
            describe_runner(&RunnerConfig::ConstantForDuration {
                concurrency: 4,
                duration: Duration::from_secs(90),
            }),
            "constant, 4 worker(s) for 1m 30s"
        );
    }
}
