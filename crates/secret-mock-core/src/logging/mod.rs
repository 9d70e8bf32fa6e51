//! Logging abstractions for the mock service
//!
//! The service never logs secret values, only object paths and method names.

mod traits;
mod noop;
mod console;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
