//! Dashboard HTTP adapter.

mod handlers;
mod routes;

pub use routes::dashboard_routes;
