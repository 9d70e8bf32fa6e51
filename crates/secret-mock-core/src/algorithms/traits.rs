//! Core trait and error types for secret-transfer algorithms

use thiserror::Error;

/// Errors that can occur during algorithm resolution and use
#[derive(Error, Debug)]
pub enum AlgorithmError {
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Decode failed: {0}")]
    Decode(String),
}

pub type AlgorithmResult<T> = Result<T, AlgorithmError>;

/// Trait for secret-transfer algorithm implementations
///
/// A handler is identified by its registered name and is constructed once,
/// held for the service's lifetime, and never mutated. Handlers do no IO,
/// so the trait is synchronous.
///
/// Implementations can be:
/// - Identity transfer for plaintext sessions (`PlainAlgorithm`)
/// - Custom obfuscation schemes a conformance suite wants to exercise
///
/// # Example
///
/// ```
/// use secret_mock_core::algorithms::{AlgorithmHandler, PlainAlgorithm};
///
/// let plain = PlainAlgorithm::new();
/// assert_eq!(plain.encode(b"111"), b"111");
/// ```
pub trait AlgorithmHandler: Send + Sync {
    /// Canonical name of this algorithm
    fn name(&self) -> &str;

    /// Compute the session-open output for a client's algorithm input
    ///
    /// Plaintext transfer has no key exchange, so the default returns an
    /// empty output regardless of input.
    fn negotiate(&self, _client_input: &[u8]) -> AlgorithmResult<Vec<u8>> {
        Ok(Vec::new())
    }

    /// Encode secret bytes for transfer to the client
    fn encode(&self, data: &[u8]) -> Vec<u8>;

    /// Decode transferred bytes back into secret bytes
    fn decode(&self, wire: &[u8]) -> AlgorithmResult<Vec<u8>>;
}
