//! HTTP handlers for dashboard endpoints.
//!
//! Both dashboards are recomputed from a fresh fetch on every request.

use axum::extract::{Json, Query, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::{GetAdminDashboardQuery, GetEntrepreneurDashboardQuery};
use crate::domain::dashboard::AdminFilter;

/// GET /api/admin/dashboard?role=&status=
pub async fn get_admin_dashboard(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(filter): Query<AdminFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = state
        .admin_dashboard_handler()
        .handle(GetAdminDashboardQuery {
            viewer: admin,
            filter,
        })
        .await?;

    Ok(Json(dashboard))
}

/// GET /api/entrepreneur/dashboard
pub async fn get_entrepreneur_dashboard(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = state
        .entrepreneur_dashboard_handler()
        .handle(GetEntrepreneurDashboardQuery { viewer: user })
        .await?;

    Ok(Json(dashboard))
}
