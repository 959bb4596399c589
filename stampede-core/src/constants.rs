/// Iteration count used when a runner omits `times`.
pub const DEFAULT_TIMES: u32 = 1;

/// Worker count used when a runner omits `concurrency`.
pub const DEFAULT_CONCURRENCY: u32 = 1;

pub const DEFAULT_TENANTS: u32 = 1;
pub const DEFAULT_USERS_PER_TENANT: u32 = 1;

/// Worker pool size the engine uses while provisioning users.
pub const DEFAULT_PROVISION_CONCURRENCY: u32 = 30;

pub const DEFAULT_DOMAIN: &str = "default";

pub const DEFAULT_START_CIDR: &str = "10.1.0.0/16";
pub const DEFAULT_NETWORKS_PER_TENANT: u32 = 1;

/// Quota value meaning "no limit".
pub const UNLIMITED_QUOTA: i64 = -1;
