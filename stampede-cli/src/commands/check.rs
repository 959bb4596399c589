use crate::cli::Cli;
use anyhow::Context;
use serde_json::json;
use stampede::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Evaluate every SLA in the document; returns false when any criterion
/// fails or a guarded scenario has no results.
pub fn run(cli: &Cli, task: &Path, results: &Path) -> anyhow::Result<bool> {
    let catalog = Catalog::builtin();
    let profile = ValidationProfile::all();

    let task = Task::validated(task, &catalog, &profile).context("task document rejected")?;
    let results = load_results(results)
        .with_context(|| format!("loading results {}", results.display()))?;

    let mut all_passed = true;
    let mut lines = Vec::new();

    for (name, runs) in task.config.iter() {
        for (idx, run) in runs.iter().enumerate() {
            if run.sla.is_empty() {
                continue;
            }

            match lookup(&results, name, idx) {
                Some(set) => {
                    let report = run.sla.check_all(set);
                    all_passed &= report.passed();
                    lines.push((format!("{name}[{idx}]"), Some(report)));
                }
                None => {
                    all_passed = false;
                    lines.push((format!("{name}[{idx}]"), None));
                }
            }
        }
    }

    if cli.json {
        let entries: Vec<_> = lines
            .iter()
            .map(|(location, report)| match report {
                Some(report) => json!({
                    "run": location,
                    "passed": report.passed(),
                    "results": &report.results,
                }),
                None => json!({
                    "run": location,
                    "passed": false,
                    "results": [],
                    "missing_results": true,
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (location, report) in &lines {
            match report {
                Some(report) => {
                    let verdict = if report.passed() { "PASS" } else { "FAIL" };
                    println!("{location}: {verdict}");
                    for result in &report.results {
                        let mark = if result.success { "ok" } else { "violated" };
                        println!("  {} {}: {}", mark, result.criterion, result.detail);
                    }
                }
                None => println!("{location}: FAIL (no results recorded)"),
            }
        }
    }

    Ok(all_passed)
}

/// Engines may key results per run (`Name[0]`) or per scenario (`Name`).
fn lookup<'a>(
    results: &'a BTreeMap<String, ResultSet>,
    name: &str,
    idx: usize,
) -> Option<&'a ResultSet> {
    results
        .get(&format!("{name}[{idx}]"))
        .or_else(|| results.get(name))
}
