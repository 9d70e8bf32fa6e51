//! Blocking client for driving the mock from tests
//!
//! Conformance tests run the service in a background task and talk to it
//! synchronously; blocking on a test thread is fine. Each call opens a
//! fresh connection.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur during client calls
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Blocking JSON-RPC client for the mock service
pub struct MockClient {
    socket_path: String,
    request_id: AtomicU64,
}

impl MockClient {
    /// Create a client for a socket path
    pub fn new(socket_path: impl Into<String>) -> Self {
        Self {
            socket_path: socket_path.into(),
            request_id: AtomicU64::new(0),
        }
    }

    /// Make a JSON-RPC request
    pub fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> ClientResult<R> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": serde_json::to_value(params)?,
        });

        let response = self.send_request(&request)?;
        self.parse_response(response)
    }

    /// Check if the service is reachable
    pub fn ping(&self) -> ClientResult<bool> {
        // Fast-fail: check if socket file exists first
        if !Path::new(&self.socket_path).exists() {
            return Err(ClientError::ConnectionFailed(
                "Socket does not exist".to_string(),
            ));
        }

        #[derive(serde::Deserialize)]
        struct PingResult {
            ok: bool,
        }

        let result: PingResult = self.call("lifecycle/ping", json!({}))?;
        Ok(result.ok)
    }

    fn send_request(&self, request: &Value) -> ClientResult<Value> {
        let stream = UnixStream::connect(&self.socket_path)
            .map_err(|e| ClientError::ConnectionFailed(e.to_string()))?;

        // Keep a stuck server from hanging the test run
        let timeout = Some(Duration::from_millis(5000));
        stream.set_read_timeout(timeout).ok();
        stream.set_write_timeout(timeout).ok();

        self.do_request(stream, request)
    }

    fn do_request(&self, mut stream: UnixStream, request: &Value) -> ClientResult<Value> {
        let content = serde_json::to_string(request)?;
        let message = format!("Content-Length: {}\r\n\r\n{}", content.len(), content);
        stream.write_all(message.as_bytes())?;
        stream.flush()?;

        let mut reader = BufReader::new(stream);
        self.read_response(&mut reader)
    }

    fn read_response<R: BufRead>(&self, reader: &mut R) -> ClientResult<Value> {
        // Read headers until we find Content-Length
        let mut content_length: Option<usize> = None;
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line)?;
            if bytes_read == 0 {
                return Err(ClientError::InvalidResponse(
                    "Connection closed".to_string(),
                ));
            }

            let line = line.trim();
            if line.is_empty() {
                // End of headers
                break;
            }

            if let Some(len_str) = line.strip_prefix("Content-Length:") {
                content_length = Some(len_str.trim().parse().map_err(|_| {
                    ClientError::InvalidResponse("Invalid Content-Length".to_string())
                })?);
            }
        }

        let length = content_length.ok_or_else(|| {
            ClientError::InvalidResponse("Missing Content-Length header".to_string())
        })?;

        let mut content = vec![0u8; length];
        reader.read_exact(&mut content)?;

        let response: Value = serde_json::from_slice(&content)?;
        Ok(response)
    }

    fn parse_response<R: DeserializeOwned>(&self, response: Value) -> ClientResult<R> {
        if let Some(error) = response.get("error") {
            let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(-1);
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            return Err(ClientError::Rpc { code, message });
        }

        let result = response
            .get("result")
            .ok_or_else(|| ClientError::InvalidResponse("Missing result field".to_string()))?;

        serde_json::from_value(result.clone()).map_err(|e| e.into())
    }
}
