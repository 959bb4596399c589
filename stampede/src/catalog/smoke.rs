//! Scenarios that exercise the engine itself rather than a platform
//! service.
use super::ScenarioDescriptor;
use crate::validation::Validator;

pub(super) fn descriptors() -> Vec<ScenarioDescriptor> {
    vec![ScenarioDescriptor::new(
        "Smoke.sleep",
        None,
        "Sleep for the given number of seconds; measures engine overhead.",
    )
    .with(Validator::non_negative("sleep"))]
}
