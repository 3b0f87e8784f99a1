//! Axum router configuration for assignment endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{assign_mentor, list_assignments};

/// Admin assignment routes, mounted at `/admin/assignments`.
pub fn admin_assignment_routes() -> Router<AppState> {
    Router::new().route("/", get(list_assignments).post(assign_mentor))
}
