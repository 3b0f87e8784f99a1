//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;
pub mod view_state;

pub use view_state::{ComposeDraft, ViewPorts, ViewSnapshot, ViewState};
