//! Attribute access over raw storage items.
//!
//! Legacy records are often partially populated, so every accessor here
//! returns a default instead of failing on a missing or non-scalar attribute.

use std::collections::HashMap;
use std::fmt::Debug;

/// A raw storage item: attribute name to value.
pub type Item<V> = HashMap<String, V>;

/// Backend-specific attribute value as seen by the migration.
pub trait AttributeValue: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Builds a string attribute.
    fn from_string(value: String) -> Self;

    /// Stringified scalar value.
    ///
    /// Strings are returned as-is, numbers in their decimal text and booleans
    /// as `true`/`false`. Null and composite values yield `None`.
    fn as_key_text(&self) -> Option<String>;
}

impl AttributeValue for serde_json::Value {
    fn from_string(value: String) -> Self {
        serde_json::Value::String(value)
    }

    fn as_key_text(&self) -> Option<String> {
        match self {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Get an optional scalar attribute as text.
pub fn text<V: AttributeValue>(item: &Item<V>, key: &str) -> Option<String> {
    item.get(key).and_then(AttributeValue::as_key_text)
}

/// Get a scalar attribute as text, or an empty string when it is absent.
pub fn text_or_default<V: AttributeValue>(item: &Item<V>, key: &str) -> String {
    text(item, key).unwrap_or_default()
}
