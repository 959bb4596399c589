#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod task;
pub mod validation;

pub use catalog::{Catalog, ScenarioDescriptor, Service};
pub use task::{load_results, Task, TaskError};
pub use validation::{validate_task, TaskReport, ValidationProfile};

pub mod prelude {
    pub use crate::catalog::{Catalog, Service};
    pub use crate::task::{load_results, Task, TaskError};
    pub use crate::validation::{validate_task, TaskReport, ValidationProfile};
    pub use stampede_core::{
        IterationResult, ResultSet, RunnerConfig, ScenarioRun, SlaConfig, SlaReport, TaskConfig,
        TimingTable,
    };
}
