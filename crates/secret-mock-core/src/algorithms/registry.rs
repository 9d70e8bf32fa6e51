//! Algorithm registries
//!
//! Two layers:
//! - `AlgorithmRegistry`: the per-service dispatch table installed via
//!   `MockService::set_algorithms`. Populated fully before the service
//!   starts serving.
//! - A process-global factory registry for constructing built-in handlers
//!   by name, so launch scripts can assemble a table from strings.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use super::plain::PlainAlgorithm;
use super::traits::{AlgorithmError, AlgorithmHandler, AlgorithmResult};

/// Per-service mapping from algorithm name to handler
///
/// Entries are exclusively owned by the registry; inserting under an
/// existing name overwrites. No iteration order is guaranteed.
#[derive(Default)]
pub struct AlgorithmRegistry {
    handlers: HashMap<String, Arc<dyn AlgorithmHandler>>,
}

impl AlgorithmRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Replace the entire table with the given mapping
    pub fn set(&mut self, mapping: HashMap<String, Arc<dyn AlgorithmHandler>>) {
        self.handlers = mapping;
    }

    /// Insert or overwrite a single entry
    pub fn insert(&mut self, name: impl Into<String>, handler: Arc<dyn AlgorithmHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    /// Resolve a handler by name
    ///
    /// Fails with `AlgorithmError::UnknownAlgorithm` when the name was never
    /// registered (or was dropped by a later `set`).
    pub fn resolve(&self, name: &str) -> AlgorithmResult<Arc<dyn AlgorithmHandler>> {
        self.handlers
            .get(name)
            .cloned()
            .ok_or_else(|| AlgorithmError::UnknownAlgorithm(name.to_string()))
    }

    /// Names currently resolvable
    pub fn names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Check whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Factory function type for creating algorithm handlers
pub type AlgorithmFactory = Box<dyn Fn() -> Arc<dyn AlgorithmHandler> + Send + Sync>;

/// Definition of a globally registered algorithm
pub struct AlgorithmDefinition {
    /// Unique name for this algorithm
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: AlgorithmFactory,
}

impl std::fmt::Debug for AlgorithmDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

/// Global registry of constructible algorithms
static REGISTRY: Lazy<RwLock<HashMap<String, AlgorithmDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "plain".to_string(),
        AlgorithmDefinition {
            name: "plain".to_string(),
            description: "Plaintext secret transfer (identity encoding)".to_string(),
            factory: Box::new(|| Arc::new(PlainAlgorithm::new())),
        },
    );

    RwLock::new(map)
});

/// Register a new algorithm type globally
///
/// # Example
///
/// ```
/// use secret_mock_core::algorithms::{register_algorithm, PlainAlgorithm};
/// use std::sync::Arc;
///
/// register_algorithm(
///     "plain-alias",
///     "Alias of the plaintext handler",
///     Box::new(|| Arc::new(PlainAlgorithm::new())),
/// );
/// ```
pub fn register_algorithm(name: &str, description: &str, factory: AlgorithmFactory) {
    let mut registry = REGISTRY.write().unwrap();
    registry.insert(
        name.to_string(),
        AlgorithmDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Create an algorithm handler by name
///
/// Returns `UnknownAlgorithm` when the name is not registered.
pub fn create_algorithm(name: &str) -> AlgorithmResult<Arc<dyn AlgorithmHandler>> {
    let registry = REGISTRY.read().unwrap();
    registry
        .get(name)
        .map(|def| (def.factory)())
        .ok_or_else(|| AlgorithmError::UnknownAlgorithm(name.to_string()))
}

/// List all globally registered algorithms as (name, description) pairs
pub fn list_algorithms() -> Vec<(String, String)> {
    let registry = REGISTRY.read().unwrap();
    registry
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect()
}

/// Check if an algorithm is globally registered
pub fn has_algorithm(name: &str) -> bool {
    let registry = REGISTRY.read().unwrap();
    registry.contains_key(name)
}
