//! Cache Entry Module
//!
//! Defines the key/value pair stored in each recency slot.

use serde::Serialize;

// == Cache Entry ==
/// A single cached item: the key and the value it was last stored with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry<K, V> {
    /// The key the entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    // == Constructor ==
    /// Creates a new entry from a key and value.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("key", 42);

        assert_eq!(entry.key, "key");
        assert_eq!(entry.value, 42);
    }

    #[test]
    fn test_entry_serializes_as_object() {
        let entry = CacheEntry::new("a", 1);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["key"], "a");
        assert_eq!(json["value"], 1);
    }
}
