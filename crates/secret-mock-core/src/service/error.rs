//! Errors that can occur during service operations

use thiserror::Error;

use crate::algorithms::AlgorithmError;

/// Errors that can occur while configuring or serving the mock
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Service has no algorithms configured")]
    NotConfigured,

    #[error("No such object: {0}")]
    NoSuchObject(String),

    #[error("Object is locked: {0}")]
    IsLocked(String),

    #[error("No such session: {0}")]
    NoSession(String),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// JSON-RPC error code this error is reported as on the wire
    pub fn jsonrpc_code(&self) -> i64 {
        match self {
            ServiceError::Algorithm(AlgorithmError::UnknownAlgorithm(_)) => -32001,
            ServiceError::NoSuchObject(_) => -32002,
            ServiceError::IsLocked(_) => -32003,
            ServiceError::NoSession(_) => -32004,
            ServiceError::Algorithm(AlgorithmError::Decode(_)) => -32005,
            ServiceError::NotConfigured => -32006,
            ServiceError::UnknownMethod(_) => -32601,
            ServiceError::Json(_) => -32602,
            ServiceError::Io(_) => -32000,
        }
    }
}
