//! Read-state storage adapters.
//!
//! Implementations of the `ReadStateStore` port for device-local watermarks.
//!
//! ## Available Adapters
//!
//! - **FileReadStateStore** - One YAML file per viewer on disk
//! - **InMemoryReadStateStore** - Process memory (testing/development)
//!
//! The server-recorded cursor store lives with the other PostgreSQL adapters.

mod file_read_state_store;
mod in_memory_read_state_store;

pub use file_read_state_store::FileReadStateStore;
pub use in_memory_read_state_store::InMemoryReadStateStore;
