//! Mock secret-storage service
//!
//! Deterministic, in-memory stand-in for a real secret service, used to
//! drive protocol-conformance tests without touching the system keychain.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

use crate::algorithms::AlgorithmRegistry;
use crate::logging::{Logger, NoOpLogger, SharedLogger};
use crate::objects::{standard_objects, SecretCollection};

use super::error::{ServiceError, ServiceResult};
use super::session::SessionTable;

/// Lifecycle state of the service
///
/// Transitions only move forward; there is no way back from `Listening`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Constructed, nothing installed yet
    Created,
    /// Algorithms installed; ready to listen
    Configured,
    /// Serving on a socket; terminal until shutdown or process exit
    Listening,
}

/// Result of an attribute search, split by lock state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Paths of matching items whose secrets are retrievable
    pub unlocked: Vec<String>,
    /// Paths of matching items that are currently locked
    pub locked: Vec<String>,
}

struct Inner {
    collections: RwLock<Vec<SecretCollection>>,
    algorithms: RwLock<AlgorithmRegistry>,
    sessions: SessionTable,
    state: RwLock<ServiceState>,
    shutdown: Notify,
    logger: SharedLogger,
}

/// The mock service
///
/// Cheap to clone; clones share the same state, which is how the listening
/// task and a test harness hold it at the same time.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use secret_mock_core::algorithms::{AlgorithmHandler, AlgorithmRegistry, PlainAlgorithm};
/// use secret_mock_core::service::MockService;
///
/// let service = MockService::new();
/// service.add_standard_objects();
///
/// let mut registry = AlgorithmRegistry::new();
/// let mut table: HashMap<String, Arc<dyn AlgorithmHandler>> = HashMap::new();
/// table.insert("plain".to_string(), Arc::new(PlainAlgorithm::new()));
/// registry.set(table);
/// service.set_algorithms(registry);
/// ```
#[derive(Clone)]
pub struct MockService {
    inner: Arc<Inner>,
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockService {
    /// Create a fresh service with a silent logger
    pub fn new() -> Self {
        Self::with_logger(Arc::new(NoOpLogger::new()))
    }

    /// Create a fresh service with the given logger
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        Self {
            inner: Arc::new(Inner {
                collections: RwLock::new(Vec::new()),
                algorithms: RwLock::new(AlgorithmRegistry::new()),
                sessions: SessionTable::new(),
                state: RwLock::new(ServiceState::Created),
                shutdown: Notify::new(),
                logger,
            }),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ServiceState {
        *self.inner.state.read()
    }

    /// Load the canned standard-object fixture set
    ///
    /// Calling this more than once appends another copy of the fixtures
    /// under suffixed ids; conformance runs call it exactly once.
    pub fn add_standard_objects(&self) {
        for collection in standard_objects() {
            self.add_collection(collection);
        }
        self.inner.logger.debug("service: standard objects loaded");
    }

    /// Add a collection, re-pathing it if its id is already taken
    ///
    /// Returns the path the collection ended up under.
    pub fn add_collection(&self, mut collection: SecretCollection) -> String {
        let mut collections = self.inner.collections.write();

        let base = collection.path.clone();
        let mut candidate = base.clone();
        let mut n = 1;
        while collections.iter().any(|c| c.path == candidate) {
            n += 1;
            candidate = format!("{}_{}", base, n);
        }
        if candidate != base {
            for item in &mut collection.items {
                item.path = item.path.replacen(&base, &candidate, 1);
            }
            collection.path = candidate.clone();
        }

        collections.push(collection);
        candidate
    }

    /// Install the algorithm table, replacing any previous one wholesale
    pub fn set_algorithms(&self, registry: AlgorithmRegistry) {
        self.inner
            .logger
            .debug(&format!("service: algorithms set to {:?}", registry.names()));
        *self.inner.algorithms.write() = registry;

        let mut state = self.inner.state.write();
        if *state == ServiceState::Created {
            *state = ServiceState::Configured;
        }
    }

    /// Open a session negotiating the named algorithm
    ///
    /// Returns the session path and the algorithm's negotiation output.
    /// Fails with `UnknownAlgorithm` when the name is not in the installed
    /// table.
    pub fn open_session(&self, algorithm: &str, input: &[u8]) -> ServiceResult<(String, Vec<u8>)> {
        let handler = self.inner.algorithms.read().resolve(algorithm)?;
        let output = handler.negotiate(input)?;
        let session = self.inner.sessions.open(handler);
        self.inner.logger.debug(&format!(
            "service: opened {} with algorithm {}",
            session.path, algorithm
        ));
        Ok((session.path.clone(), output))
    }

    /// Close a session; returns whether it was open
    pub fn close_session(&self, session: &str) -> bool {
        self.inner.sessions.close(session)
    }

    /// Find items matching every attribute pair, split by lock state
    pub fn search_items(&self, query: &HashMap<String, String>) -> SearchResult {
        let collections = self.inner.collections.read();
        let mut result = SearchResult {
            unlocked: Vec::new(),
            locked: Vec::new(),
        };
        for collection in collections.iter() {
            for item in collection.search(query) {
                if item.locked {
                    result.locked.push(item.path.clone());
                } else {
                    result.unlocked.push(item.path.clone());
                }
            }
        }
        result
    }

    /// Retrieve a secret, encoded by the session's algorithm
    pub fn get_secret(&self, session: &str, item: &str) -> ServiceResult<Vec<u8>> {
        let session = self
            .inner
            .sessions
            .get(session)
            .ok_or_else(|| ServiceError::NoSession(session.to_string()))?;

        let collections = self.inner.collections.read();
        let found = collections
            .iter()
            .find_map(|c| c.item(item))
            .ok_or_else(|| ServiceError::NoSuchObject(item.to_string()))?;

        if found.locked {
            return Err(ServiceError::IsLocked(item.to_string()));
        }

        Ok(session.algorithm.encode(&found.secret))
    }

    /// Replace a secret, decoding the wire bytes via the session's algorithm
    pub fn set_secret(&self, session: &str, item: &str, wire: &[u8]) -> ServiceResult<()> {
        let session = self
            .inner
            .sessions
            .get(session)
            .ok_or_else(|| ServiceError::NoSession(session.to_string()))?;

        let value = session.algorithm.decode(wire)?;

        let mut collections = self.inner.collections.write();
        let found = collections
            .iter_mut()
            .find_map(|c| c.item_mut(item))
            .ok_or_else(|| ServiceError::NoSuchObject(item.to_string()))?;

        if found.locked {
            return Err(ServiceError::IsLocked(item.to_string()));
        }

        found.secret = value;
        Ok(())
    }

    /// Lock collections or individual items; unknown paths are ignored
    ///
    /// Returns the paths whose lock state actually changed.
    pub fn lock(&self, paths: &[String]) -> Vec<String> {
        self.set_locked(paths, true)
    }

    /// Unlock collections or individual items; unknown paths are ignored
    ///
    /// The mock never prompts, so unlocking always succeeds.
    pub fn unlock(&self, paths: &[String]) -> Vec<String> {
        self.set_locked(paths, false)
    }

    fn set_locked(&self, paths: &[String], locked: bool) -> Vec<String> {
        let mut collections = self.inner.collections.write();
        let mut changed = Vec::new();
        for path in paths {
            if let Some(collection) = collections.iter_mut().find(|c| &c.path == path) {
                if collection.locked != locked {
                    collection.set_locked(locked);
                    changed.push(path.clone());
                }
                continue;
            }
            if let Some(item) = collections.iter_mut().find_map(|c| c.item_mut(path)) {
                if item.locked != locked {
                    item.locked = locked;
                    changed.push(path.clone());
                }
            }
        }
        changed
    }

    /// Paths of all collections
    pub fn collection_paths(&self) -> Vec<String> {
        self.inner
            .collections
            .read()
            .iter()
            .map(|c| c.path.clone())
            .collect()
    }

    /// Resolve a collection alias, e.g. "default"
    pub fn read_alias(&self, name: &str) -> Option<String> {
        self.inner
            .collections
            .read()
            .iter()
            .find(|c| c.alias.as_deref() == Some(name))
            .map(|c| c.path.clone())
    }

    /// Signal the listening loop to stop
    pub fn shutdown(&self) {
        self.inner.logger.info("service: shutdown requested");
        self.inner.shutdown.notify_one();
    }

    pub(crate) fn shutdown_notify(&self) -> &Notify {
        &self.inner.shutdown
    }

    pub(crate) fn logger(&self) -> &SharedLogger {
        &self.inner.logger
    }

    /// Serve protocol interactions on a Unix socket until `shutdown()`
    ///
    /// Blocks the calling task. Fails with `NotConfigured` when no
    /// algorithm table has been installed.
    pub async fn listen(&self, socket_path: impl AsRef<Path>) -> ServiceResult<()> {
        {
            if self.inner.algorithms.read().is_empty() {
                return Err(ServiceError::NotConfigured);
            }
            let mut state = self.inner.state.write();
            *state = ServiceState::Listening;
        }
        crate::rpc::serve(self.clone(), socket_path.as_ref()).await
    }
}
