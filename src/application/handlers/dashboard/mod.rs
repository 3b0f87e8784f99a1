//! Dashboard query handlers.
//!
//! Read-only handlers that fetch a fresh snapshot and project it.

mod admin_dashboard;
mod entrepreneur_dashboard;

pub use admin_dashboard::{GetAdminDashboardHandler, GetAdminDashboardQuery};
pub use entrepreneur_dashboard::{GetEntrepreneurDashboardHandler, GetEntrepreneurDashboardQuery};
