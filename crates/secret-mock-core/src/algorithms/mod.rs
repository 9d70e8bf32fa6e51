//! Pluggable secret-transfer algorithms
//!
//! This module provides the algorithm-dispatch table the mock service resolves
//! handlers from:
//! - `AlgorithmHandler` trait for implementing custom handlers
//! - Built-in `PlainAlgorithm` (identity transfer)
//! - `AlgorithmRegistry`, the per-service name -> handler table
//! - A global factory registry for constructing handlers by name

mod traits;
mod plain;
mod registry;

pub use traits::{AlgorithmHandler, AlgorithmError, AlgorithmResult};
pub use plain::PlainAlgorithm;
pub use registry::{
    AlgorithmRegistry, register_algorithm, create_algorithm, list_algorithms,
    has_algorithm, AlgorithmDefinition,
};
