//! The mock service
//!
//! `MockService` owns the fixture collections, the algorithm table, and any
//! open sessions. Lifecycle is linear: `Created -> Configured -> Listening`,
//! with all configuration (`add_standard_objects`, `set_algorithms`)
//! happening synchronously before `listen()`.

mod error;
mod session;
mod mock_service;
mod dispatch;

pub use error::{ServiceError, ServiceResult};
pub use session::{Session, SessionTable};
pub use mock_service::{MockService, ServiceState, SearchResult};
