//! Single-table multi-tenancy migration.
//!
//! Rewrites every legacy record's primary and secondary keys so they embed a
//! tenant identifier. Shared lookup types move to the global tenant, all other
//! declared types move to the configured target tenant. Each record is
//! replaced atomically and already-migrated records are skipped, so a run can
//! be repeated safely at any time.

mod attributes;
mod error;
mod executor;
mod keys;
mod record;
mod report;
mod scanner;
mod schema;
mod tenant;

pub use attributes::{text, text_or_default, AttributeValue, Item};
pub use error::{MigrationError, MigrationFailure, TenantError};
pub use executor::{MigrationOptions, Migrator};
pub use keys::{
    build_index1_keys, build_index2_keys, build_keys, build_primary_key, build_sort_key, segment,
    IndexKeys, KeySet, DELIMITER, ROOT_TOKEN,
};
pub use record::{classify, Classification, LegacyRecord, MigrationPlan, SkipReason};
pub use report::{ItemOutcome, MigrationReport};
pub use scanner::TableScanner;
pub use schema::{
    EntityKind, KeySchema, ENTITY_TYPE_ATTRIBUTE, GSI1_PK_ATTRIBUTE, GSI1_SK_ATTRIBUTE,
    GSI2_PK_ATTRIBUTE, GSI2_SK_ATTRIBUTE, PK_ATTRIBUTE, SHARED_KINDS, SK_ATTRIBUTE,
    TENANT_ATTRIBUTE,
};
pub use tenant::{TenantId, TenantResolver, DEFAULT_TENANT, GLOBAL_TENANT};
