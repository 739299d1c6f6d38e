//! Migration run wiring.

use thiserror::Error;

use propman_core::storage::MigrationStore;
use propman_core::tenancy::{MigrationError, MigrationReport, Migrator};

use crate::config::{Config, ConfigError};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Migration(#[from] MigrationError),
}

/// Validate `config` and migrate every legacy record in `store`.
pub async fn run<S: MigrationStore>(
    store: S,
    config: &Config,
) -> Result<MigrationReport, RunError> {
    config.validate()?;

    let migrator = Migrator::new(store, config.resolver()?).with_options(config.options());
    Ok(migrator.run().await?)
}
