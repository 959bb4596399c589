//! Scenarios exercising the DNS API: domains and records.
use super::{ScenarioDescriptor, Service};
use crate::validation::Validator;

const GROUP: Service = Service::Dns;

pub(super) fn descriptors() -> Vec<ScenarioDescriptor> {
    vec![
        ScenarioDescriptor::new(
            "DnsBasic.create_and_list_domains",
            Some(GROUP),
            "Create a domain, then list all domains.",
        ),
        ScenarioDescriptor::new(
            "DnsBasic.list_domains",
            Some(GROUP),
            "List all domains in the tenant.",
        ),
        ScenarioDescriptor::new(
            "DnsBasic.create_and_delete_domain",
            Some(GROUP),
            "Create a domain, then delete it.",
        ),
        ScenarioDescriptor::new(
            "DnsBasic.create_and_list_records",
            Some(GROUP),
            "Create records in a fresh domain, then list them.",
        )
        .with(Validator::positive_int("records_per_domain")),
        ScenarioDescriptor::new(
            "DnsBasic.create_and_delete_records",
            Some(GROUP),
            "Create records in a fresh domain, then delete them.",
        )
        .with(Validator::positive_int("records_per_domain")),
        ScenarioDescriptor::new(
            "DnsBasic.list_records",
            Some(GROUP),
            "List the records of one domain.",
        )
        .with(Validator::RequiredParams(&["domain_id"])),
    ]
}
