//! Standalone mock service with the plaintext algorithm only
//!
//! Starts the mock pre-loaded with the standard objects and exactly one
//! transfer algorithm, "plain". Runs until killed.

use std::collections::HashMap;
use std::sync::Arc;

use secret_mock_core::{
    AlgorithmHandler, AlgorithmRegistry, ConsoleLogger, MockService, NoOpLogger, PlainAlgorithm,
    ServiceConfig, SharedLogger,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env();
    let logger: SharedLogger = if config.quiet {
        Arc::new(NoOpLogger::new())
    } else {
        Arc::new(ConsoleLogger::new())
    };

    let service = MockService::with_logger(logger);
    service.add_standard_objects();

    let mut registry = AlgorithmRegistry::new();
    let mut table: HashMap<String, Arc<dyn AlgorithmHandler>> = HashMap::new();
    table.insert("plain".to_string(), Arc::new(PlainAlgorithm::new()));
    registry.set(table);
    service.set_algorithms(registry);

    service.listen(&config.socket_path).await?;
    Ok(())
}
