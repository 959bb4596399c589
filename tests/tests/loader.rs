use stampede::prelude::*;
use std::fs;

#[test]
fn load_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();
    let doc = r#"{"Smoke.sleep": [{"args": {"sleep": 1}}]}"#;

    let json = dir.path().join("t.json");
    fs::write(&json, doc).unwrap();
    assert_eq!(Task::load(&json).unwrap().config.total_runs(), 1);

    let yaml = dir.path().join("t.yaml");
    fs::write(&yaml, "Smoke.sleep:\n  - args:\n      sleep: 1\n").unwrap();
    assert_eq!(Task::load(&yaml).unwrap().config.total_runs(), 1);

    let toml = dir.path().join("t.toml");
    fs::write(&toml, "").unwrap();
    assert!(matches!(
        Task::load(&toml),
        Err(TaskError::UnsupportedFormat(_))
    ));

    assert!(matches!(
        Task::load(dir.path().join("missing.json")),
        Err(TaskError::Io(_))
    ));
}

#[test]
fn invalid_document_is_rejected_by_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"Imaginary.scenario": [{}]}"#).unwrap();

    let err = Task::validated(&path, &Catalog::builtin(), &ValidationProfile::all()).unwrap_err();
    match err {
        TaskError::Invalid(report) => assert_eq!(report.failures.len(), 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn results_files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    fs::write(
        &path,
        r#"{"Smoke.sleep": [{"duration": 0.5}, {"duration": 0.7, "error": "boom"}]}"#,
    )
    .unwrap();

    let results = load_results(&path).unwrap();
    let set = &results["Smoke.sleep"];
    assert_eq!(set.len(), 2);
    assert_eq!(set.failure_count(), 1);
    assert_eq!(set.max_duration(), Some(std::time::Duration::from_millis(700)));
}
