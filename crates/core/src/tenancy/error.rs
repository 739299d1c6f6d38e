use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors raised when configuring the migration target tenant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TenantError {
    #[error("Target tenant id must not be empty")]
    Empty,
    #[error("Target tenant id '{0}' is reserved for shared records")]
    Reserved(String),
}

/// Errors that abort a migration run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// A scan page could not be read. Items migrated so far stay migrated.
    #[error("Table scan aborted: {0}")]
    Scan(#[source] RepositoryError),
}

/// A single record whose transaction failed. Processing continues past it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to migrate {entity_type} (PK={legacy_pk}): {cause}")]
pub struct MigrationFailure {
    pub entity_type: String,
    pub legacy_pk: String,
    pub cause: String,
}
