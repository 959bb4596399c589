//! Scenarios exercising the network API: networks, subnets, routers and
//! ports, usually create-then-list/update/delete pairs.
use super::{ScenarioDescriptor, Service};
use crate::validation::Validator;

const GROUP: Service = Service::Network;

pub(super) fn descriptors() -> Vec<ScenarioDescriptor> {
    vec![
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_list_networks",
            Some(GROUP),
            "Create a network, then list all networks.",
        ),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_update_networks",
            Some(GROUP),
            "Create a network, then update it.",
        )
        .with(Validator::RequiredParams(&["network_update_args"])),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_delete_networks",
            Some(GROUP),
            "Create a network, then delete it.",
        ),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_list_subnets",
            Some(GROUP),
            "Create a network with subnets, then list all subnets.",
        )
        .with(Validator::positive_int("subnets_per_network")),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_update_subnets",
            Some(GROUP),
            "Create a network with subnets, then update every subnet.",
        )
        .with(Validator::RequiredParams(&["subnet_update_args"]))
        .with(Validator::positive_int("subnets_per_network")),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_delete_subnets",
            Some(GROUP),
            "Create a network with subnets, then delete every subnet.",
        )
        .with(Validator::RequiredParams(&["subnets_per_network"])),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_list_routers",
            Some(GROUP),
            "Create routers wired to each subnet, then list all routers.",
        )
        .with(Validator::positive_int("subnets_per_network")),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_update_routers",
            Some(GROUP),
            "Create routers wired to each subnet, then update every router.",
        )
        .with(Validator::RequiredParams(&["router_update_args", "subnets_per_network"]))
        .with(Validator::positive_int("subnets_per_network")),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_list_ports",
            Some(GROUP),
            "Create ports on a network, then list all ports.",
        )
        .with(Validator::positive_int("ports_per_network")),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_update_ports",
            Some(GROUP),
            "Create ports on a network, then update every port.",
        )
        .with(Validator::RequiredParams(&["port_update_args"]))
        .with(Validator::positive_int("ports_per_network")),
        ScenarioDescriptor::new(
            "NetworkTopologies.create_and_delete_ports",
            Some(GROUP),
            "Create ports on a network, then delete every port.",
        )
        .with(Validator::RequiredParams(&["ports_per_network"])),
    ]
}
