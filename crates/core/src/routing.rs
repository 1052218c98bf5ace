//! Tenant routing.
//!
//! Each queue message carries a routing key (its `MessageGroupId`) that selects the tenant
//! datastore its records belong to. The mapping is closed: keys not listed here are rejected and
//! the message is skipped.

use crate::constants::{HCA_DATABASE, HCB_DATABASE, ROUTING_KEY_HCA, ROUTING_KEY_HCB};

/// The tenants this worker writes to.
///
/// This enum is deliberately *closed*; adding a tenant means adding a variant, a routing key and
/// a database name together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenantId {
    /// Tenant A, routing key `001`.
    Hca,
    /// Tenant B, routing key `002`.
    Hcb,
}

impl TenantId {
    /// Logical database holding this tenant's records.
    pub fn database_name(&self) -> &'static str {
        match self {
            TenantId::Hca => HCA_DATABASE,
            TenantId::Hcb => HCB_DATABASE,
        }
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.database_name())
    }
}

/// Map a routing key to its tenant.
///
/// Pure and total over strings: unknown keys, including the empty string, yield `None`.
pub fn route(routing_key: &str) -> Option<TenantId> {
    match routing_key {
        ROUTING_KEY_HCA => Some(TenantId::Hca),
        ROUTING_KEY_HCB => Some(TenantId::Hcb),
        _ => None,
    }
}
