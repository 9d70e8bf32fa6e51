//! Wire transport for the mock service
//!
//! The protocol is JSON-RPC 2.0 with LSP-style `Content-Length` headers
//! over a Unix domain socket:
//!
//! ```text
//! Content-Length: 57\r\n
//! \r\n
//! {"jsonrpc":"2.0","id":1,"method":"lifecycle/ping", ...}
//! ```
//!
//! `serve` is the async accept loop behind `MockService::listen`;
//! `MockClient` is the blocking client conformance tests drive it with.

mod server;
mod client;

pub(crate) use server::serve;
pub use client::{ClientError, ClientResult, MockClient};
