//! Tenant resolution for migrated records.

use std::fmt;

use super::error::TenantError;
use super::schema::{EntityKind, SHARED_KINDS};

/// Token used as the tenant of shared lookup records.
pub const GLOBAL_TENANT: &str = "GLOBAL";

/// Target tenant used when none is configured.
pub const DEFAULT_TENANT: &str = "default";

/// The tenant a record is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantId {
    Global,
    Organization(String),
}

impl TenantId {
    pub fn as_str(&self) -> &str {
        match self {
            TenantId::Global => GLOBAL_TENANT,
            TenantId::Organization(id) => id,
        }
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assigns shared types to the global tenant and everything else to the
/// single migration target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantResolver {
    shared: &'static [EntityKind],
    target: String,
}

impl TenantResolver {
    /// Creates a resolver for `target` using the declared shared types.
    pub fn new(target: impl Into<String>) -> Result<Self, TenantError> {
        let target = target.into();
        if target.trim().is_empty() {
            return Err(TenantError::Empty);
        }
        if target == GLOBAL_TENANT {
            return Err(TenantError::Reserved(target));
        }
        Ok(Self {
            shared: SHARED_KINDS,
            target,
        })
    }

    /// Overrides the set of shared types.
    pub fn with_shared(mut self, shared: &'static [EntityKind]) -> Self {
        self.shared = shared;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn resolve(&self, kind: EntityKind) -> TenantId {
        if self.shared.contains(&kind) {
            TenantId::Global
        } else {
            TenantId::Organization(self.target.clone())
        }
    }
}
