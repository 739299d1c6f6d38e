//! Paginated full-table reads.

use futures_util::Stream;

use crate::storage::{MigrationStore, RepositoryError};

use super::attributes::Item;

/// Reads a table page by page, following the continuation cursor.
///
/// Only one page is held at a time. A failed page read ends the stream with
/// that error; nothing is retried here.
pub struct TableScanner<'a, S: MigrationStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: MigrationStore + ?Sized> TableScanner<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Stream of item pages in backend order.
    pub fn pages(&self) -> impl Stream<Item = Result<Vec<Item<S::Value>>, RepositoryError>> + 'a {
        let store = self.store;
        async_stream::try_stream! {
            let mut cursor = None;
            let mut page_number = 0_u64;
            loop {
                let page = store.scan_page(cursor.take()).await?;
                let next = page.next_cursor().cloned();
                page_number += 1;
                tracing::debug!(
                    page = page_number,
                    items = page.items.len(),
                    has_more = next.is_some(),
                    "Scanned page"
                );
                yield page.items;
                match next {
                    Some(key) => cursor = Some(key),
                    None => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use futures_util::StreamExt;
    use serde_json::{json, Value};

    use super::*;
    use crate::storage::{Result, ScanPage};

    /// Serves canned pages and records the cursors it was asked for.
    struct PagedStore {
        pages: Vec<ScanPage<Value>>,
        fail_at: Option<usize>,
        requests: Mutex<Vec<Option<Item<Value>>>>,
    }

    impl PagedStore {
        fn new(pages: Vec<ScanPage<Value>>) -> Self {
            Self {
                pages,
                fail_at: None,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MigrationStore for PagedStore {
        type Value = Value;

        async fn scan_page(&self, start_key: Option<Item<Value>>) -> Result<ScanPage<Value>> {
            let mut requests = self.requests.lock().unwrap();
            let index = requests.len();
            requests.push(start_key);
            if self.fail_at == Some(index) {
                return Err(RepositoryError::ScanFailed("Throughput exceeded".to_string()));
            }
            Ok(self.pages[index].clone())
        }

        async fn replace_item(&self, _: Item<Value>, _: Item<Value>) -> Result<()> {
            unreachable!("scanner never writes")
        }
    }

    fn cursor(pk: &str) -> Item<Value> {
        HashMap::from([("PK".to_string(), json!(pk))])
    }

    fn items(pks: &[&str]) -> Vec<Item<Value>> {
        pks.iter().map(|pk| cursor(pk)).collect()
    }

    #[tokio::test]
    async fn test_follows_cursor_until_exhausted() {
        let store = PagedStore::new(vec![
            ScanPage {
                items: items(&["A", "B"]),
                last_evaluated_key: Some(cursor("B")),
            },
            ScanPage::last(items(&["C"])),
        ]);

        let pages: Vec<_> = TableScanner::new(&store).pages().collect().await;

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].as_ref().unwrap().len(), 2);
        assert_eq!(pages[1].as_ref().unwrap().len(), 1);
        assert_eq!(
            *store.requests.lock().unwrap(),
            vec![None, Some(cursor("B"))]
        );
    }

    #[tokio::test]
    async fn test_empty_cursor_ends_scan() {
        let store = PagedStore::new(vec![ScanPage {
            items: items(&["A"]),
            last_evaluated_key: Some(HashMap::new()),
        }]);

        let pages: Vec<_> = TableScanner::new(&store).pages().collect().await;
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn test_page_failure_ends_stream_with_error() {
        let mut store = PagedStore::new(vec![ScanPage {
            items: items(&["A"]),
            last_evaluated_key: Some(cursor("A")),
        }]);
        store.fail_at = Some(1);

        let pages: Vec<_> = TableScanner::new(&store).pages().collect().await;

        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_ok());
        assert!(matches!(pages[1], Err(RepositoryError::ScanFailed(_))));
    }
}
