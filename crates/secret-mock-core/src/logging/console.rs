//! Console logger

use super::traits::Logger;

/// A logger that writes to the terminal the mock was launched from
///
/// Info goes to stdout; debug, warnings and errors go to stderr so a
/// conformance harness capturing stdout sees only the signal it asked for.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            prefix: "[SecretMock]".to_string(),
        }
    }

    /// Use a custom prefix, e.g. to tell two mocks apart in one run
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        eprintln!("{} DEBUG: {}", self.prefix, message);
    }

    fn info(&self, message: &str) {
        println!("{} INFO: {}", self.prefix, message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} WARN: {}", self.prefix, message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} ERROR: {}", self.prefix, message);
    }
}
