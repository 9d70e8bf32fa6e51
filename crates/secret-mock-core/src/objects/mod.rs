//! Fixture object model
//!
//! Collections of attribute-tagged secret items, plus the canned
//! "standard objects" conformance suites expect to find pre-loaded.

mod item;
mod collection;
mod fixtures;

pub use item::SecretItem;
pub use collection::SecretCollection;
pub use fixtures::standard_objects;
