//! Environment requirements a task document declares for its runs.
//!
//! Contexts describe what the engine must provision before iterating a
//! scenario: tenants and users, quota overrides, and per-tenant networks.
//! Sections carry an ordering weight so provisioning happens users-first.
use crate::constants::{
    DEFAULT_DOMAIN, DEFAULT_NETWORKS_PER_TENANT, DEFAULT_PROVISION_CONCURRENCY, DEFAULT_START_CIDR,
    DEFAULT_TENANTS, DEFAULT_USERS_PER_TENANT,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use thiserror::Error;

pub const USERS_ORDER: u32 = 100;
pub const QUOTAS_ORDER: u32 = 300;
pub const NETWORK_ORDER: u32 = 500;

/// Quota keys the compute service understands.
pub const COMPUTE_QUOTA_KEYS: &[&str] = &[
    "instances",
    "cores",
    "ram",
    "floating_ips",
    "fixed_ips",
    "metadata_items",
    "injected_files",
    "key_pairs",
    "security_groups",
    "security_group_rules",
];

/// Quota keys the network service understands.
pub const NETWORK_QUOTA_KEYS: &[&str] = &[
    "network",
    "subnet",
    "port",
    "router",
    "floatingip",
    "security_group",
    "security_group_rule",
];

/// The context sections of one scenario run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextSet {
    pub users: UsersContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotas: Option<QuotasContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkContext>,
}

impl ContextSet {
    pub fn is_default(&self) -> bool {
        *self == ContextSet::default()
    }

    pub fn has(&self, name: &str) -> bool {
        match name {
            "users" => true,
            "quotas" => self.quotas.is_some(),
            "network" => self.network.is_some(),
            _ => false,
        }
    }

    /// Present sections in provisioning order.
    pub fn in_order(&self) -> Vec<ContextSection<'_>> {
        let mut sections = vec![ContextSection::Users(&self.users)];
        if let Some(quotas) = &self.quotas {
            sections.push(ContextSection::Quotas(quotas));
        }
        if let Some(network) = &self.network {
            sections.push(ContextSection::Network(network));
        }
        sections.sort_by_key(ContextSection::order);
        sections
    }
}

/// A borrowed view of one present context section.
#[derive(Debug, Clone, Copy)]
pub enum ContextSection<'a> {
    Users(&'a UsersContext),
    Quotas(&'a QuotasContext),
    Network(&'a NetworkContext),
}

impl ContextSection<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            ContextSection::Users(_) => "users",
            ContextSection::Quotas(_) => "quotas",
            ContextSection::Network(_) => "network",
        }
    }

    pub fn order(&self) -> u32 {
        match self {
            ContextSection::Users(_) => USERS_ORDER,
            ContextSection::Quotas(_) => QUOTAS_ORDER,
            ContextSection::Network(_) => NETWORK_ORDER,
        }
    }
}

/// Temporary tenants and users to provision for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UsersContext {
    pub tenants: u32,
    pub users_per_tenant: u32,
    /// Worker pool size the engine may use while creating users.
    pub concurrent: u32,
    pub project_domain: String,
    pub user_domain: String,
    /// When set, every tenant also gets a network with this subnet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_subnet: Option<String>,
}

impl UsersContext {
    pub fn total_users(&self) -> u64 {
        u64::from(self.tenants) * u64::from(self.users_per_tenant)
    }
}

impl Default for UsersContext {
    fn default() -> Self {
        Self {
            tenants: DEFAULT_TENANTS,
            users_per_tenant: DEFAULT_USERS_PER_TENANT,
            concurrent: DEFAULT_PROVISION_CONCURRENCY,
            project_domain: DEFAULT_DOMAIN.to_string(),
            user_domain: DEFAULT_DOMAIN.to_string(),
            network_subnet: None,
        }
    }
}

/// Per-tenant quota overrides, keyed by service quota name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuotasContext {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub compute: BTreeMap<String, i64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub network: BTreeMap<String, i64>,
}

impl QuotasContext {
    pub fn is_empty(&self) -> bool {
        self.compute.is_empty() && self.network.is_empty()
    }
}

/// Per-tenant networks to provision before the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkContext {
    pub start_cidr: String,
    pub networks_per_tenant: u32,
}

impl NetworkContext {
    /// The CIDR blocks the engine will hand out, one per tenant network,
    /// starting from `start_cidr` and never overlapping.
    pub fn cidr_plan(&self, tenants: u32) -> Result<Vec<String>, CidrError> {
        let (addr, len) = parse_cidr(&self.start_cidr)?;
        let mut current = format!("{}/{}", Ipv4Addr::from(block_base(addr, len) as u32), len);

        let total = tenants as usize * self.networks_per_tenant as usize;
        let mut blocks = Vec::with_capacity(total);
        for i in 0..total {
            blocks.push(current.clone());
            if i + 1 < total {
                current = next_cidr(&current)?;
            }
        }
        Ok(blocks)
    }
}

impl Default for NetworkContext {
    fn default() -> Self {
        Self {
            start_cidr: DEFAULT_START_CIDR.to_string(),
            networks_per_tenant: DEFAULT_NETWORKS_PER_TENANT,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CidrError {
    #[error("malformed CIDR block: {0}")]
    Malformed(String),
    #[error("prefix length /{0} out of range")]
    PrefixLength(u8),
    #[error("IPv4 space exhausted after {0}")]
    Exhausted(String),
}

/// Parse an `a.b.c.d/len` block.
pub fn parse_cidr(cidr: &str) -> Result<(Ipv4Addr, u8), CidrError> {
    let (addr, len) = cidr
        .split_once('/')
        .ok_or_else(|| CidrError::Malformed(cidr.to_string()))?;
    let addr: Ipv4Addr = addr
        .parse()
        .map_err(|_| CidrError::Malformed(cidr.to_string()))?;
    let len: u8 = len
        .parse()
        .map_err(|_| CidrError::Malformed(cidr.to_string()))?;
    if len == 0 || len > 32 {
        return Err(CidrError::PrefixLength(len));
    }
    Ok((addr, len))
}

/// The sibling block following `cidr`, aligned to its prefix length.
pub fn next_cidr(cidr: &str) -> Result<String, CidrError> {
    let (addr, len) = parse_cidr(cidr)?;
    let size = 1u64 << (32 - len);
    let next = block_base(addr, len) + size;
    if next + size > 1 << 32 {
        return Err(CidrError::Exhausted(cidr.to_string()));
    }
    Ok(format!("{}/{}", Ipv4Addr::from(next as u32), len))
}

fn block_base(addr: Ipv4Addr, len: u8) -> u64 {
    let size = 1u64 << (32 - len);
    u64::from(u32::from(addr)) & !(size - 1)
}
