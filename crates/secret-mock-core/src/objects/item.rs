//! Secret item model

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single stored secret with its lookup attributes
///
/// Items are addressed by a path-like id, e.g.
/// `/collections/english/item_one`. The path is assigned by the owning
/// service when the item is added to a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretItem {
    /// Path-like id, unique within the service
    pub path: String,
    /// Human-readable label
    pub label: String,
    /// Lookup attributes; searches match on these
    pub attributes: HashMap<String, String>,
    /// The secret value; travels as a plain JSON byte array
    pub secret: Vec<u8>,
    /// Locked items refuse secret retrieval until unlocked
    pub locked: bool,
}

impl SecretItem {
    /// Create an unlocked item; the path is filled in by the collection
    pub fn new(
        label: impl Into<String>,
        attributes: HashMap<String, String>,
        secret: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            path: String::new(),
            label: label.into(),
            attributes,
            secret: secret.into(),
            locked: false,
        }
    }

    /// Check whether this item matches every given attribute pair
    ///
    /// An empty query matches everything, mirroring the original service's
    /// search semantics.
    pub fn matches(&self, query: &HashMap<String, String>) -> bool {
        query
            .iter()
            .all(|(k, v)| self.attributes.get(k) == Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_matches_all_pairs() {
        let item = SecretItem::new(
            "Item One",
            attrs(&[("number", "1"), ("string", "one"), ("even", "false")]),
            b"111".to_vec(),
        );

        assert!(item.matches(&attrs(&[("number", "1")])));
        assert!(item.matches(&attrs(&[("number", "1"), ("even", "false")])));
        assert!(!item.matches(&attrs(&[("number", "2")])));
        assert!(!item.matches(&attrs(&[("number", "1"), ("even", "true")])));
        assert!(!item.matches(&attrs(&[("missing", "1")])));
    }

    #[test]
    fn test_empty_query_matches() {
        let item = SecretItem::new("Item", HashMap::new(), b"x".to_vec());
        assert!(item.matches(&HashMap::new()));
    }
}
