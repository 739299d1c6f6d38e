use crate::tenancy::{AttributeValue, Item};

/// One page of a full-table scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage<V: AttributeValue> {
    /// Raw items in backend order.
    pub items: Vec<Item<V>>,
    /// Continuation cursor. `None` (or an empty map) means the scan is done.
    pub last_evaluated_key: Option<Item<V>>,
}

impl<V: AttributeValue> ScanPage<V> {
    /// Creates a page with no continuation.
    pub fn last(items: Vec<Item<V>>) -> Self {
        Self {
            items,
            last_evaluated_key: None,
        }
    }

    /// Returns the cursor for the next page, treating an empty map as exhausted.
    pub fn next_cursor(&self) -> Option<&Item<V>> {
        self.last_evaluated_key.as_ref().filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn test_last_page_has_no_cursor() {
        let page: ScanPage<Value> = ScanPage::last(Vec::new());
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn test_empty_cursor_is_exhausted() {
        let page: ScanPage<Value> = ScanPage {
            items: Vec::new(),
            last_evaluated_key: Some(HashMap::new()),
        };
        assert!(page.next_cursor().is_none());
    }

    #[test]
    fn test_non_empty_cursor_is_returned() {
        let cursor = HashMap::from([("PK".to_string(), json!("CUSTOMER#1"))]);
        let page: ScanPage<Value> = ScanPage {
            items: Vec::new(),
            last_evaluated_key: Some(cursor.clone()),
        };
        assert_eq!(page.next_cursor(), Some(&cursor));
    }
}
