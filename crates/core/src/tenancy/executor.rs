//! Migration executor.
//!
//! Drives the scan, classifies every item, and replaces each legacy record
//! with its tenant-scoped copy in a single put+delete transaction. Per-item
//! failures are recorded and never stop the run; a failed page read does.

use std::collections::HashMap;

use futures_util::{stream, StreamExt};

use crate::storage::MigrationStore;

use super::attributes::{text_or_default, AttributeValue, Item};
use super::error::{MigrationError, MigrationFailure};
use super::record::{classify, Classification};
use super::report::{ItemOutcome, MigrationReport};
use super::scanner::TableScanner;
use super::schema::{ENTITY_TYPE_ATTRIBUTE, PK_ATTRIBUTE, SK_ATTRIBUTE};
use super::tenant::TenantResolver;

/// Run options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Maximum number of item transactions in flight within a page.
    pub concurrency: usize,
    /// Build keys and count outcomes without writing anything.
    pub dry_run: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            dry_run: false,
        }
    }
}

/// Rewrites every legacy record of a table into the tenant-scoped key format.
pub struct Migrator<S: MigrationStore> {
    store: S,
    resolver: TenantResolver,
    options: MigrationOptions,
}

impl<S: MigrationStore> Migrator<S> {
    pub fn new(store: S, resolver: TenantResolver) -> Self {
        Self {
            store,
            resolver,
            options: MigrationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: MigrationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the migration over the whole table.
    ///
    /// Returns the report once the scan completes, or the scan error if a page
    /// could not be read.
    pub async fn run(&self) -> Result<MigrationReport, MigrationError> {
        tracing::info!(
            tenant = self.resolver.target(),
            concurrency = self.options.concurrency,
            dry_run = self.options.dry_run,
            "Starting tenancy migration"
        );

        let mut report = MigrationReport::new(self.options.dry_run);
        let pages = TableScanner::new(&self.store).pages();
        futures_util::pin_mut!(pages);

        while let Some(page) = pages.next().await {
            let items = page.map_err(|err| {
                tracing::error!(
                    error = %err,
                    scanned = report.scanned,
                    migrated = report.migrated,
                    "Scan failed, aborting migration"
                );
                MigrationError::Scan(err)
            })?;

            for outcome in self.process_page(items).await {
                report.record(outcome);
            }
        }

        tracing::info!(
            scanned = report.scanned,
            migrated = report.migrated,
            skipped = report.skipped,
            errors = report.errors.len(),
            skip_reasons = ?report.skip_reasons(),
            "Tenancy migration finished"
        );

        Ok(report)
    }

    /// Process one page, returning outcomes in scan order.
    ///
    /// Items sharing a legacy key run one after another inside a single task,
    /// so two transactions for the same key are never in flight together.
    async fn process_page(&self, items: Vec<Item<S::Value>>) -> Vec<ItemOutcome> {
        let concurrency = self.options.concurrency.max(1);

        stream::iter(group_by_legacy_key(items))
            .map(|group| async move {
                let mut outcomes = Vec::with_capacity(group.len());
                for item in group {
                    outcomes.push(self.migrate_item(item).await);
                }
                outcomes
            })
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn migrate_item(&self, item: Item<S::Value>) -> ItemOutcome {
        let record = match classify(item) {
            Classification::Skip(reason) => {
                tracing::debug!(%reason, "Skipping item");
                return ItemOutcome::Skipped(reason);
            }
            Classification::Legacy(record) => record,
        };

        let plan = record.plan(&self.resolver);

        if self.options.dry_run {
            tracing::info!(
                entity_type = %plan.kind,
                legacy_pk = %plan.legacy_pk,
                new_pk = %plan.keys.pk,
                new_sk = %plan.keys.sk,
                "Dry run: would migrate record"
            );
            return ItemOutcome::Migrated;
        }

        match self
            .store
            .replace_item(plan.new_item, plan.legacy_key)
            .await
        {
            Ok(()) => {
                tracing::debug!(
                    entity_type = %plan.kind,
                    legacy_pk = %plan.legacy_pk,
                    new_pk = %plan.keys.pk,
                    tenant = %plan.tenant,
                    "Migrated record"
                );
                ItemOutcome::Migrated
            }
            Err(err) => {
                tracing::warn!(
                    entity_type = %plan.kind,
                    legacy_pk = %plan.legacy_pk,
                    error = %err,
                    "Failed to migrate record"
                );
                ItemOutcome::Failed(MigrationFailure {
                    entity_type: plan.kind.discriminator().to_string(),
                    legacy_pk: plan.legacy_pk,
                    cause: err.to_string(),
                })
            }
        }
    }
}

/// Group items by legacy `(PK, SK)`, keeping first-appearance order.
fn group_by_legacy_key<V: AttributeValue>(items: Vec<Item<V>>) -> Vec<Vec<Item<V>>> {
    let mut groups: Vec<Vec<Item<V>>> = Vec::with_capacity(items.len());
    let mut index: HashMap<(String, String), usize> = HashMap::with_capacity(items.len());

    for item in items {
        // Keyless items cannot collide on a transaction; keep them apart.
        let key = (
            text_or_default(&item, PK_ATTRIBUTE),
            text_or_default(&item, SK_ATTRIBUTE),
        );
        if key.0.is_empty() && key.1.is_empty() {
            tracing::trace!(
                entity_type = %text_or_default(&item, ENTITY_TYPE_ATTRIBUTE),
                "Item has no legacy key"
            );
            groups.push(vec![item]);
            continue;
        }
        match index.get(&key) {
            Some(&position) => groups[position].push(item),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![item]);
            }
        }
    }

    groups
}
