//! Per-client algorithm sessions
//!
//! A session binds one negotiated algorithm handler to subsequent secret
//! transfers. Sessions live until explicitly closed or the service drops.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::algorithms::AlgorithmHandler;

/// An open session
pub struct Session {
    /// Path-like id, e.g. `/sessions/s1`
    pub path: String,
    /// The handler negotiated at open time
    pub algorithm: Arc<dyn AlgorithmHandler>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("path", &self.path)
            .field("algorithm", &self.algorithm.name())
            .finish()
    }
}

/// Table of open sessions, shared across connection tasks
#[derive(Default)]
pub struct SessionTable {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    next_id: AtomicU64,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for a handler, assigning a fresh path
    pub fn open(&self, algorithm: Arc<dyn AlgorithmHandler>) -> Arc<Session> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let session = Arc::new(Session {
            path: format!("/sessions/s{}", id),
            algorithm,
        });
        self.sessions
            .write()
            .insert(session.path.clone(), Arc::clone(&session));
        session
    }

    /// Look up a session by path
    pub fn get(&self, path: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(path).cloned()
    }

    /// Close a session; returns whether it existed
    pub fn close(&self, path: &str) -> bool {
        self.sessions.write().remove(path).is_some()
    }

    /// Number of open sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Check if no sessions are open
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
