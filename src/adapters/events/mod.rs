//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process audit trail, logged and retained for inspection

mod in_memory;

pub use in_memory::InMemoryEventBus;
