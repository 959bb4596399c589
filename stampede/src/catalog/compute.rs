//! Scenarios exercising the compute API: server lifecycle, snapshots,
//! resizes and floating IPs.
use super::{ScenarioDescriptor, Service};
use crate::validation::Validator;

const GROUP: Service = Service::Compute;

pub(super) fn descriptors() -> Vec<ScenarioDescriptor> {
    vec![
        ScenarioDescriptor::new(
            "ComputeServers.boot_server",
            Some(GROUP),
            "Boot a server and wait for it to become active.",
        )
        .with(Validator::RequiredParams(&["flavor", "image"])),
        ScenarioDescriptor::new(
            "ComputeServers.boot_and_delete_server",
            Some(GROUP),
            "Boot a server, optionally sleep, then delete it.",
        )
        .with(Validator::RequiredParams(&["flavor", "image"]))
        .with(Validator::non_negative("min_sleep"))
        .with(Validator::non_negative("max_sleep")),
        ScenarioDescriptor::new(
            "ComputeServers.boot_and_bounce_server",
            Some(GROUP),
            "Boot a server and run a list of bounce actions (reboot, stop/start, rescue) against it.",
        )
        .with(Validator::RequiredParams(&["flavor", "image", "actions"])),
        ScenarioDescriptor::new(
            "ComputeServers.boot_and_list_servers",
            Some(GROUP),
            "Boot a server, then list all servers in the tenant.",
        )
        .with(Validator::RequiredParams(&["flavor", "image"])),
        ScenarioDescriptor::new(
            "ComputeServers.list_servers",
            Some(GROUP),
            "List servers in the tenant.",
        ),
        ScenarioDescriptor::new(
            "ComputeServers.snapshot_server",
            Some(GROUP),
            "Boot a server, snapshot it, boot from the snapshot, then delete both.",
        )
        .with(Validator::RequiredParams(&["flavor", "image"])),
        ScenarioDescriptor::new(
            "ComputeServers.resize_server",
            Some(GROUP),
            "Boot a server and resize it to a different flavor.",
        )
        .with(Validator::RequiredParams(&["flavor", "image", "to_flavor"])),
        ScenarioDescriptor::new(
            "ComputeServers.suspend_and_resume_server",
            Some(GROUP),
            "Boot a server, suspend it, then resume it.",
        )
        .with(Validator::RequiredParams(&["flavor", "image"])),
        ScenarioDescriptor::new(
            "ComputeServers.boot_and_associate_floating_ip",
            Some(GROUP),
            "Boot a server and associate a floating IP with it.",
        )
        .with(Validator::RequiredParams(&["flavor", "image"]))
        .with(Validator::RequiredContexts(&["network"])),
    ]
}
