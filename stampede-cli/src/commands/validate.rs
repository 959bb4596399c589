use crate::cli::Cli;
use anyhow::Context;
use serde_json::json;
use stampede::prelude::*;
use std::path::PathBuf;

/// Validate each document; returns false when any document is invalid.
pub fn run(cli: &Cli, tasks: &[PathBuf]) -> anyhow::Result<bool> {
    let catalog = Catalog::builtin();
    let profile = ValidationProfile::all();
    let mut all_valid = true;

    for path in tasks {
        let task = Task::load(path).with_context(|| format!("loading {}", path.display()))?;
        let report = validate_task(&task.config, &catalog, &profile);

        if cli.json {
            let line = json!({
                "task": path.display().to_string(),
                "valid": report.is_valid(),
                "failures": &report.failures,
            });
            println!("{}", serde_json::to_string_pretty(&line)?);
        } else if report.is_valid() {
            println!(
                "{}: OK ({} scenario(s), {} run(s))",
                path.display(),
                task.config.scenario_count(),
                task.config.total_runs()
            );
        } else {
            println!("{}: INVALID", path.display());
            for failure in &report.failures {
                println!("  {}: {}", failure.location, failure.message);
            }
        }

        all_valid &= report.is_valid();
    }

    Ok(all_valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli() -> Cli {
        Cli::parse_from(["stampede", "validate", "unused"])
    }

    #[test]
    fn accepts_good_and_flags_bad_documents() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.json");
        let mut f = std::fs::File::create(&good).unwrap();
        write!(
            f,
            r#"{{"Smoke.sleep": [{{"args": {{"sleep": 1}}, "runner": {{"type": "serial", "times": 3}}}}]}}"#
        )
        .unwrap();

        let bad = dir.path().join("bad.json");
        let mut f = std::fs::File::create(&bad).unwrap();
        write!(f, r#"{{"BlockStorage.create_volume": [{{}}]}}"#).unwrap();

        assert!(run(&cli(), &[good.clone()]).unwrap());
        assert!(!run(&cli(), &[good, bad]).unwrap());
    }

    #[test]
    fn unreadable_document_is_a_hard_error() {
        let missing = PathBuf::from("/nonexistent/task.json");
        assert!(run(&cli(), &[missing]).is_err());
    }
}
