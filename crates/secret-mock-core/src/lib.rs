//! Secret Mock Core
//!
//! A mock secret-storage service for protocol-conformance tests. The mock
//! pre-loads a canned fixture set ("standard objects"), resolves pluggable
//! secret-transfer algorithms by name, and serves JSON-RPC over a Unix
//! socket until shut down. It never touches the real system keychain.
//!
//! A conformance run configures everything up front and then listens:
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use secret_mock_core::{AlgorithmHandler, AlgorithmRegistry, MockService, PlainAlgorithm};
//!
//! let service = MockService::new();
//! service.add_standard_objects();
//!
//! let mut registry = AlgorithmRegistry::new();
//! let mut table: HashMap<String, Arc<dyn AlgorithmHandler>> = HashMap::new();
//! table.insert("plain".to_string(), Arc::new(PlainAlgorithm::new()));
//! registry.set(table);
//! service.set_algorithms(registry);
//!
//! service.listen("/tmp/secret-mock.sock").await?;
//! ```

pub mod algorithms;
pub mod objects;
pub mod service;
pub mod rpc;
pub mod logging;
pub mod config;

// Re-export commonly used types
pub use algorithms::{
    AlgorithmHandler, AlgorithmError, AlgorithmResult, AlgorithmRegistry, PlainAlgorithm,
    register_algorithm, create_algorithm, list_algorithms,
};

pub use objects::{SecretCollection, SecretItem, standard_objects};

pub use service::{MockService, SearchResult, ServiceError, ServiceResult, ServiceState};

pub use rpc::{ClientError, ClientResult, MockClient};

pub use logging::{ConsoleLogger, Logger, NoOpLogger, SharedLogger};

pub use config::ServiceConfig;
