//! Secret collection model

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::item::SecretItem;

/// A named group of secret items
///
/// Locking a collection locks every item in it; items added to a locked
/// collection start out locked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretCollection {
    /// Path-like id, e.g. `/collections/english`
    pub path: String,
    /// Human-readable label
    pub label: String,
    /// Whether the collection (and its items) are locked
    pub locked: bool,
    /// Alias this collection answers to, e.g. "default"
    pub alias: Option<String>,
    /// Items keyed by their path
    pub items: Vec<SecretItem>,
}

impl SecretCollection {
    /// Create an empty unlocked collection
    pub fn new(id: impl AsRef<str>, label: impl Into<String>) -> Self {
        Self {
            path: format!("/collections/{}", id.as_ref()),
            label: label.into(),
            locked: false,
            alias: None,
            items: Vec::new(),
        }
    }

    /// Builder-style: mark the collection locked
    pub fn locked(mut self) -> Self {
        self.locked = true;
        for item in &mut self.items {
            item.locked = true;
        }
        self
    }

    /// Builder-style: set the alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Add an item, assigning it a path under this collection
    ///
    /// The item inherits the collection's lock state. Returns the assigned
    /// path.
    pub fn add_item(&mut self, id: impl AsRef<str>, mut item: SecretItem) -> String {
        item.path = format!("{}/{}", self.path, id.as_ref());
        item.locked = self.locked;
        let path = item.path.clone();
        self.items.push(item);
        path
    }

    /// Look up an item by path
    pub fn item(&self, path: &str) -> Option<&SecretItem> {
        self.items.iter().find(|i| i.path == path)
    }

    /// Look up an item mutably by path
    pub fn item_mut(&mut self, path: &str) -> Option<&mut SecretItem> {
        self.items.iter_mut().find(|i| i.path == path)
    }

    /// Set the lock state of the collection and all its items
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        for item in &mut self.items {
            item.locked = locked;
        }
    }

    /// Items matching every attribute pair in the query
    pub fn search(&self, query: &HashMap<String, String>) -> Vec<&SecretItem> {
        self.items.iter().filter(|i| i.matches(query)).collect()
    }
}
