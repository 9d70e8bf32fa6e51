//! Silent logger

use super::traits::Logger;

/// A logger that discards everything
///
/// `MockService::new` installs this one, keeping unit-test output free of
/// mock chatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_through_trait_object() {
        // Exercised the way the service holds it
        let logger: &dyn Logger = &NoOpLogger::new();
        logger.debug("dropped");
        logger.info("dropped");
        logger.warn("dropped");
        logger.error("dropped");
    }
}
