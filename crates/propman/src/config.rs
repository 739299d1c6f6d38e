use clap::Args;
use thiserror::Error;

use propman_core::tenancy::{MigrationOptions, TenantError, TenantResolver, DEFAULT_TENANT};

/// Table migrated when none is configured.
pub const DEFAULT_TABLE_NAME: &str = "propman";

/// Migration run configuration.
///
/// Every setting can come from a flag or its environment variable.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// DynamoDB table holding the legacy records
    #[arg(long, env = "DYNAMODB_TABLE_NAME", default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Tenant that receives every non-shared record
    #[arg(long, env = "MIGRATION_TENANT_ID", default_value = DEFAULT_TENANT)]
    pub tenant_id: String,

    /// Maximum item transactions in flight within one page
    #[arg(long, env = "MIGRATION_CONCURRENCY", default_value_t = 1)]
    pub concurrency: usize,

    /// Items requested per scan page (service default when unset)
    #[arg(long, env = "MIGRATION_PAGE_SIZE")]
    pub page_size: Option<i32>,

    /// Count what would be migrated without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            tenant_id: DEFAULT_TENANT.to_string(),
            concurrency: 1,
            page_size: None,
            dry_run: false,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Table name cannot be empty")]
    EmptyTableName,

    #[error("Invalid tenant: {0}")]
    InvalidTenant(#[from] TenantError),

    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("Page size must be positive, got {0}")]
    InvalidPageSize(i32),
}

impl Config {
    /// Check every value before anything touches the table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if let Some(size) = self.page_size.filter(|size| *size <= 0) {
            return Err(ConfigError::InvalidPageSize(size));
        }
        self.resolver()?;
        Ok(())
    }

    pub fn resolver(&self) -> Result<TenantResolver, ConfigError> {
        Ok(TenantResolver::new(self.tenant_id.clone())?)
    }

    pub fn options(&self) -> MigrationOptions {
        MigrationOptions {
            concurrency: self.concurrency,
            dry_run: self.dry_run,
        }
    }
}
