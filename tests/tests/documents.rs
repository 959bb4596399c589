//! Every shipped task document must parse and validate against the builtin
//! catalog.
use stampede::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn tasks_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../tasks")
}

#[tracing_test::traced_test]
#[test]
fn shipped_documents_validate() {
    let catalog = Catalog::builtin();
    let profile = ValidationProfile::all();
    let mut seen = 0;

    for entry in std::fs::read_dir(tasks_dir()).unwrap() {
        let path = entry.unwrap().path();
        let task = Task::load(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        let report = validate_task(&task.config, &catalog, &profile);

        assert!(report.is_valid(), "{}:\n{report}", path.display());
        assert!(!task.config.is_empty(), "{}", path.display());
        seen += 1;
    }

    assert!(seen >= 5, "expected the full document set, found {seen}");
}

#[test]
fn compute_document_overrides_boot_timeout() {
    let task = Task::load(tasks_dir().join("compute.json")).unwrap();
    assert_eq!(
        task.timings.get("boot").unwrap().timeout,
        Duration::from_secs(600)
    );
    // Operations the document leaves alone keep their defaults.
    assert_eq!(
        task.timings.get("suspend").unwrap().timeout,
        Duration::from_secs(300)
    );
}

#[test]
fn every_scenario_in_shipped_documents_is_known() {
    let catalog = Catalog::builtin();
    for entry in std::fs::read_dir(tasks_dir()).unwrap() {
        let path = entry.unwrap().path();
        let task = Task::load(&path).unwrap();
        for name in task.config.scenario_names() {
            assert!(catalog.get(name).is_some(), "{name} missing from catalog");
        }
    }
}
