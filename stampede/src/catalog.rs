//! The scenario catalog: which scenario names a task document may use, what
//! service each one exercises, and the argument checks attached to it.
mod compute;
mod dns;
mod network;
mod smoke;

use crate::validation::Validator;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Platform services scenarios exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Compute,
    Network,
    Dns,
}

impl Service {
    pub const ALL: [Service; 3] = [Service::Compute, Service::Network, Service::Dns];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Compute => "compute",
            Service::Network => "network",
            Service::Dns => "dns",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered scenario: its dotted name, the service it needs (if any),
/// and the validators to run over each of its runs.
#[derive(Debug, Clone)]
pub struct ScenarioDescriptor {
    name: &'static str,
    service: Option<Service>,
    description: &'static str,
    validators: Vec<Validator>,
}

impl ScenarioDescriptor {
    fn new(name: &'static str, service: Option<Service>, description: &'static str) -> Self {
        Self {
            name,
            service,
            description,
            validators: Vec::new(),
        }
    }

    fn with(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn service(&self) -> Option<Service> {
        self.service
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }
}

/// All scenarios a document may reference.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    scenarios: BTreeMap<&'static str, ScenarioDescriptor>,
}

impl Catalog {
    /// The built-in scenario families: compute, network, dns, smoke.
    pub fn builtin() -> Self {
        let mut catalog = Catalog::default();
        for descriptor in compute::descriptors() {
            catalog.add(descriptor);
        }
        for descriptor in network::descriptors() {
            catalog.add(descriptor);
        }
        for descriptor in dns::descriptors() {
            catalog.add(descriptor);
        }
        for descriptor in smoke::descriptors() {
            catalog.add(descriptor);
        }
        catalog
    }

    pub fn add(&mut self, descriptor: ScenarioDescriptor) {
        debug_assert!(
            !self.scenarios.contains_key(descriptor.name),
            "duplicate scenario {}",
            descriptor.name
        );
        self.scenarios.insert(descriptor.name, descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioDescriptor> {
        self.scenarios.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scenarios.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioDescriptor> {
        self.scenarios.values()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
