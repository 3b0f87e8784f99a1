//! HTTP handlers for admin assignment endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAdmin;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{AssignMentorCommand, ListAssignmentsQuery};

use super::dto::{AssignMentorRequest, AssignMentorResponse, AssignmentListResponse};

/// GET /api/admin/assignments
pub async fn list_assignments(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .list_assignments_handler()
        .handle(ListAssignmentsQuery)
        .await?;

    Ok(Json(AssignmentListResponse {
        assignments: result.assignments,
    }))
}

/// POST /api/admin/assignments - Assign or reassign an entrepreneur
pub async fn assign_mentor(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<AssignMentorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .assign_mentor_handler()
        .handle(AssignMentorCommand {
            entrepreneur_id: request.entrepreneur_id,
            mentor_id: request.mentor_id,
            portfolio_number: request.portfolio_number,
        })
        .await?;

    tracing::info!(
        admin = %admin.email,
        entrepreneur_id = %request.entrepreneur_id,
        mentor_id = %request.mentor_id,
        reassigned = result.previous.is_some(),
        "Mentor assignment recorded"
    );
    Ok(Json(AssignMentorResponse {
        assignment: result.assignment,
        previous: result.previous,
    }))
}
