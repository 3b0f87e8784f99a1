//! HTTP routes for dashboard endpoints.

use axum::routing::get;
use axum::Router;

use crate::adapters::http::state::AppState;

use super::handlers::{get_admin_dashboard, get_entrepreneur_dashboard};

/// Dashboard routes, mounted at the API root.
///
/// - `GET /admin/dashboard` - Applicant table, counts and admin unread
/// - `GET /entrepreneur/dashboard` - Tier, features, mentor and notes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/dashboard", get(get_admin_dashboard))
        .route("/entrepreneur/dashboard", get(get_entrepreneur_dashboard))
}
