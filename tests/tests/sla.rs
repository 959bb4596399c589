use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use stampede::prelude::Task;
use stampede_core::{IterationResult, ResultSet, SlaConfig};
use std::path::Path;
use std::time::Duration;

#[test]
fn noisy_results_within_thresholds_pass() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let set: ResultSet = (0..500)
        .map(|_| IterationResult::ok(Duration::from_secs_f64(rng.gen_range(0.5..2.0))))
        .collect();

    let sla = SlaConfig {
        max_failure_percent: Some(0.0),
        max_seconds_per_iteration: Some(2.0),
        max_avg_duration: Some(1.6),
    };
    assert!(sla.check_all(&set).passed());
}

#[test]
fn sparse_failures_trip_a_tight_failure_budget() {
    let mut rng = SmallRng::seed_from_u64(42);
    let set: ResultSet = (0..200)
        .map(|i| {
            let duration = Duration::from_secs_f64(rng.gen_range(0.5..1.5));
            if i % 50 == 0 {
                IterationResult::failed(duration, "timed out")
            } else {
                IterationResult::ok(duration)
            }
        })
        .collect();

    // 4 failures out of 200 iterations is 2%.
    let tight = SlaConfig {
        max_failure_percent: Some(1.0),
        ..Default::default()
    };
    assert!(!tight.check_all(&set).passed());

    let loose = SlaConfig {
        max_failure_percent: Some(2.0),
        ..Default::default()
    };
    assert!(loose.check_all(&set).passed());
}

#[test]
fn document_slas_evaluate_against_engine_results() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../tasks/smoke.json");
    let task = Task::load(&path).unwrap();
    let runs = task.config.runs_for("Smoke.sleep");

    // Second run guards both the failure rate and the mean duration.
    let sla = &runs[1].sla;
    assert!(!sla.is_empty());

    let ok: ResultSet = (0..100)
        .map(|_| IterationResult::ok(Duration::from_millis(600)))
        .collect();
    assert!(sla.check_all(&ok).passed());

    let mut bad = ok.clone();
    bad.push(IterationResult::failed(
        Duration::from_secs(3),
        "worker lost",
    ));
    assert!(!sla.check_all(&bad).passed());
}
