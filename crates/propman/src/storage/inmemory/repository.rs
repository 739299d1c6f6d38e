//! In-memory repository implementation.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use propman_core::storage::{MigrationStore, RepositoryError, Result, ScanPage};
use propman_core::tenancy::{text_or_default, Item, PK_ATTRIBUTE, SK_ATTRIBUTE};

type TableKey = (String, String);

fn table_key(item: &Item<Value>) -> TableKey {
    (
        text_or_default(item, PK_ATTRIBUTE),
        text_or_default(item, SK_ATTRIBUTE),
    )
}

/// In-memory single table keyed by `(PK, SK)`.
///
/// A scan started without a cursor takes a snapshot of the table; later pages
/// are served from that snapshot, so items written during a run are not
/// revisited. Transactions for configured legacy keys and a configured scan
/// page can be made to fail.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    items: Arc<RwLock<BTreeMap<TableKey, Item<Value>>>>,
    snapshot: Arc<RwLock<Vec<Item<Value>>>>,
    pages_served: Arc<RwLock<usize>>,
    failing_pks: Arc<RwLock<HashSet<String>>>,
    failing_page: Option<usize>,
    page_size: usize,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            snapshot: Arc::new(RwLock::new(Vec::new())),
            pages_served: Arc::new(RwLock::new(0)),
            failing_pks: Arc::new(RwLock::new(HashSet::new())),
            failing_page: None,
            page_size: 100,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Makes the scan fail when asked for the page at `index` (zero-based).
    pub fn with_failing_page(mut self, index: usize) -> Self {
        self.failing_page = Some(index);
        self
    }

    /// Makes every transaction deleting `legacy_pk` fail.
    pub async fn fail_transactions_for(&self, legacy_pk: impl Into<String>) {
        self.failing_pks.write().await.insert(legacy_pk.into());
    }

    /// Stores `item` as-is, replacing any item with the same keys.
    pub async fn insert(&self, item: Item<Value>) {
        self.items.write().await.insert(table_key(&item), item);
    }

    pub async fn get(&self, pk: &str, sk: &str) -> Option<Item<Value>> {
        self.items
            .read()
            .await
            .get(&(pk.to_string(), sk.to_string()))
            .cloned()
    }

    /// All items in key order.
    pub async fn items(&self) -> Vec<Item<Value>> {
        self.items.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl MigrationStore for InMemoryRepository {
    type Value = Value;

    async fn scan_page(&self, start_key: Option<Item<Value>>) -> Result<ScanPage<Value>> {
        let mut snapshot = self.snapshot.write().await;
        let mut pages_served = self.pages_served.write().await;

        let start = match start_key.as_ref().map(table_key) {
            None => {
                *snapshot = self.items.read().await.values().cloned().collect();
                *pages_served = 0;
                0
            }
            Some(after) => snapshot
                .iter()
                .position(|item| table_key(item) == after)
                .map(|position| position + 1)
                .ok_or_else(|| {
                    RepositoryError::ScanFailed(format!("Unknown start key: {:?}", after))
                })?,
        };

        if self.failing_page == Some(*pages_served) {
            return Err(RepositoryError::ScanFailed(
                "Throughput exceeded, please retry".to_string(),
            ));
        }
        *pages_served += 1;

        let end = (start + self.page_size).min(snapshot.len());
        let items = snapshot[start..end].to_vec();
        let last_evaluated_key = if end < snapshot.len() {
            items.last().map(|item| {
                let (pk, sk) = table_key(item);
                HashMap::from([
                    (PK_ATTRIBUTE.to_string(), Value::String(pk)),
                    (SK_ATTRIBUTE.to_string(), Value::String(sk)),
                ])
            })
        } else {
            None
        };

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }

    async fn replace_item(&self, new_item: Item<Value>, legacy_key: Item<Value>) -> Result<()> {
        let legacy = table_key(&legacy_key);
        if self.failing_pks.read().await.contains(&legacy.0) {
            return Err(RepositoryError::TransactionFailed(
                "Throughput exceeded, please retry".to_string(),
            ));
        }

        let mut items = self.items.write().await;
        let new_key = table_key(&new_item);
        let put_ok = !items.contains_key(&new_key);
        let delete_ok = items.contains_key(&legacy);
        if !(put_ok && delete_ok) {
            let code = |ok: bool| if ok { "None" } else { "ConditionalCheckFailed" };
            return Err(RepositoryError::TransactionCancelled(format!(
                "[{}, {}]",
                code(put_ok),
                code(delete_ok)
            )));
        }

        items.remove(&legacy);
        items.insert(new_key, new_item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn item(pk: &str, sk: &str) -> Item<Value> {
        HashMap::from([
            ("PK".to_string(), json!(pk)),
            ("SK".to_string(), json!(sk)),
        ])
    }

    #[tokio::test]
    async fn test_scan_pages_through_snapshot() {
        let repo = InMemoryRepository::new().with_page_size(2);
        for id in ["a", "b", "c"] {
            repo.insert(item(id, id)).await;
        }

        let first = repo.scan_page(None).await.unwrap();
        assert_eq!(first.items.len(), 2);
        let cursor = first.next_cursor().cloned();
        assert!(cursor.is_some());

        repo.insert(item("z", "z")).await;

        let second = repo.scan_page(cursor).await.unwrap();
        assert_eq!(second.items, vec![item("c", "c")]);
        assert!(second.next_cursor().is_none());
    }

    #[tokio::test]
    async fn test_failing_page() {
        let repo = InMemoryRepository::new()
            .with_page_size(1)
            .with_failing_page(1);
        repo.insert(item("a", "a")).await;
        repo.insert(item("b", "b")).await;

        let first = repo.scan_page(None).await.unwrap();
        let result = repo.scan_page(first.next_cursor().cloned()).await;
        assert!(matches!(result, Err(RepositoryError::ScanFailed(_))));
    }

    #[tokio::test]
    async fn test_replace_item_swaps_records() {
        let repo = InMemoryRepository::new();
        repo.insert(item("OLD", "OLD")).await;

        repo.replace_item(item("NEW", "NEW"), item("OLD", "OLD"))
            .await
            .unwrap();

        assert!(repo.get("OLD", "OLD").await.is_none());
        assert!(repo.get("NEW", "NEW").await.is_some());
    }

    #[tokio::test]
    async fn test_replace_item_refuses_existing_target() {
        let repo = InMemoryRepository::new();
        repo.insert(item("OLD", "OLD")).await;
        repo.insert(item("NEW", "NEW")).await;

        let result = repo
            .replace_item(item("NEW", "NEW"), item("OLD", "OLD"))
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::TransactionCancelled(
                "[ConditionalCheckFailed, None]".to_string()
            ))
        );
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_replace_item_requires_legacy_record() {
        let repo = InMemoryRepository::new();

        let result = repo
            .replace_item(item("NEW", "NEW"), item("OLD", "OLD"))
            .await;

        assert_eq!(
            result,
            Err(RepositoryError::TransactionCancelled(
                "[None, ConditionalCheckFailed]".to_string()
            ))
        );
        assert!(repo.get("NEW", "NEW").await.is_none());
    }

    #[tokio::test]
    async fn test_injected_transaction_failure_leaves_record() {
        let repo = InMemoryRepository::new();
        repo.insert(item("OLD", "OLD")).await;
        repo.fail_transactions_for("OLD").await;

        let result = repo
            .replace_item(item("NEW", "NEW"), item("OLD", "OLD"))
            .await;

        assert!(matches!(result, Err(RepositoryError::TransactionFailed(_))));
        assert_eq!(repo.get("OLD", "OLD").await, Some(item("OLD", "OLD")));
    }
}
