//! Assignment HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use routes::admin_assignment_routes;
