//! Plaintext transfer algorithm

use super::traits::{AlgorithmHandler, AlgorithmResult};

/// Identity algorithm: secrets cross the wire unchanged
///
/// This is the handler conformance scripts install as `"plain"`. There is
/// no key exchange; `negotiate` returns an empty output for any input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainAlgorithm;

impl PlainAlgorithm {
    /// Create a new plain handler
    pub fn new() -> Self {
        Self
    }
}

impl AlgorithmHandler for PlainAlgorithm {
    fn name(&self) -> &str {
        "plain"
    }

    fn encode(&self, data: &[u8]) -> Vec<u8> {
        data.to_vec()
    }

    fn decode(&self, wire: &[u8]) -> AlgorithmResult<Vec<u8>> {
        Ok(wire.to_vec())
    }
}
