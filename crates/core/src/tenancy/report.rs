use std::collections::BTreeMap;

use serde::Serialize;

use super::error::MigrationFailure;
use super::record::SkipReason;

/// Terminal outcome of one scanned item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Skipped(SkipReason),
    Migrated,
    Failed(MigrationFailure),
}

/// Aggregated result of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub scanned: u64,
    pub migrated: u64,
    pub skipped: u64,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
    #[serde(skip)]
    skip_reasons: BTreeMap<String, u64>,
}

impl MigrationReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Count one scanned item and its outcome.
    pub fn record(&mut self, outcome: ItemOutcome) {
        self.scanned += 1;
        match outcome {
            ItemOutcome::Skipped(reason) => {
                self.skipped += 1;
                *self.skip_reasons.entry(reason.to_string()).or_default() += 1;
            }
            ItemOutcome::Migrated => self.migrated += 1,
            ItemOutcome::Failed(failure) => self.errors.push(failure.to_string()),
        }
    }

    /// Skip counts keyed by reason.
    pub fn skip_reasons(&self) -> &BTreeMap<String, u64> {
        &self.skip_reasons
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
