//! HTTP handlers for applicant, admin review and payment endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    ConfirmPaymentCommand, CreateCheckoutCommand, HandlePaymentWebhookCommand,
    ListApplicantsQuery, ResubmitApplicationCommand, ReviewApplicantCommand,
    RewriteAnswersCommand, SetApplicantAccessCommand, SubmitApplicationCommand,
};
use crate::domain::applicant::ReviewAction;
use crate::domain::foundation::{ApplicantId, DomainError, ErrorCode};

use super::dto::{
    AdminActionResponse, ApplicantListResponse, ApplicantResponse, CheckoutRequest,
    CheckoutResponse, ConfirmPaymentResponse, ListApplicantsParams, ResubmitApplicationRequest,
    RewriteAnswersRequest, RewriteAnswersResponse, SubmitApplicationRequest, WebhookResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Applicant Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/applicants - Submit an application under the session email
pub async fn submit_application(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(session_role) = user.role.applicant_role() else {
        return Err(ApiError(DomainError::new(
            ErrorCode::Forbidden,
            "Admin accounts do not submit applications",
        )));
    };
    if request.application.role() != session_role {
        return Err(ApiError::bad_request(
            "application.role",
            format!(
                "{} application submitted from a {} session",
                request.application.role(),
                session_role
            ),
        ));
    }

    let name = request
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| user.name.clone());
    let result = state
        .submit_application_handler()
        .handle(SubmitApplicationCommand {
            email: user.email,
            name,
            payload: request.application,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicantResponse {
            applicant: result.applicant,
        }),
    ))
}

/// POST /api/applicants/:id/resubmit - Move a rejected application back to pending
pub async fn resubmit_application(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(applicant_id): Path<ApplicantId>,
    Json(request): Json<ResubmitApplicationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .resubmit_application_handler()
        .handle(ResubmitApplicationCommand {
            applicant_id,
            actor: user,
            payload: request.application,
        })
        .await?;

    Ok(Json(ApplicantResponse {
        applicant: result.applicant,
    }))
}

/// POST /api/applicants/rewrite-answers - AI rewrite of questionnaire answers
pub async fn rewrite_answers(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<RewriteAnswersRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .rewrite_answers_handler()
        .handle(RewriteAnswersCommand {
            answers: request.answers,
        })
        .await?;

    Ok(Json(RewriteAnswersResponse {
        answers: result.answers,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/applicants?role= - List applicants, optionally by role
pub async fn list_applicants(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListApplicantsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .list_applicants_handler()
        .handle(ListApplicantsQuery { role: params.role })
        .await?;

    Ok(Json(ApplicantListResponse {
        total: result.applicants.len(),
        applicants: result.applicants,
    }))
}

/// POST /api/admin/applicants/:id/approve
pub async fn approve_applicant(
    state: State<AppState>,
    admin: RequireAdmin,
    path: Path<ApplicantId>,
) -> Result<impl IntoResponse, ApiError> {
    review(state, admin, path, ReviewAction::Approve).await
}

/// POST /api/admin/applicants/:id/reject
pub async fn reject_applicant(
    state: State<AppState>,
    admin: RequireAdmin,
    path: Path<ApplicantId>,
) -> Result<impl IntoResponse, ApiError> {
    review(state, admin, path, ReviewAction::Reject).await
}

async fn review(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(applicant_id): Path<ApplicantId>,
    action: ReviewAction,
) -> Result<Json<AdminActionResponse>, ApiError> {
    let result = state
        .review_applicant_handler()
        .handle(ReviewApplicantCommand {
            applicant_id,
            action,
        })
        .await?;

    tracing::info!(
        admin = %admin.email,
        %applicant_id,
        ?action,
        "Admin review recorded"
    );
    Ok(Json(AdminActionResponse::new(result.applicant, result.change)))
}

/// POST /api/admin/applicants/:id/disable
pub async fn disable_applicant(
    state: State<AppState>,
    admin: RequireAdmin,
    path: Path<ApplicantId>,
) -> Result<impl IntoResponse, ApiError> {
    set_access(state, admin, path, true).await
}

/// POST /api/admin/applicants/:id/enable
pub async fn enable_applicant(
    state: State<AppState>,
    admin: RequireAdmin,
    path: Path<ApplicantId>,
) -> Result<impl IntoResponse, ApiError> {
    set_access(state, admin, path, false).await
}

async fn set_access(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(applicant_id): Path<ApplicantId>,
    disabled: bool,
) -> Result<Json<AdminActionResponse>, ApiError> {
    let result = state
        .set_access_handler()
        .handle(SetApplicantAccessCommand {
            applicant_id,
            disabled,
        })
        .await?;

    tracing::info!(admin = %admin.email, %applicant_id, disabled, "Applicant access updated");
    Ok(Json(AdminActionResponse::new(result.applicant, result.change)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Payment Endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payments/checkout - Start the Founders Circle checkout
pub async fn create_checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .create_checkout_handler()
        .handle(CreateCheckoutCommand {
            email: user.email,
            success_url: request
                .success_url
                .unwrap_or_else(|| state.checkout_urls.success_url.clone()),
            cancel_url: request
                .cancel_url
                .unwrap_or_else(|| state.checkout_urls.cancel_url.clone()),
        })
        .await?;

    Ok(Json(CheckoutResponse::from(result.session)))
}

/// POST /api/payments/confirm - Ask the provider whether the session email has paid
pub async fn confirm_payment(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .confirm_payment_handler()
        .handle(ConfirmPaymentCommand { email: user.email })
        .await?;

    Ok(Json(ConfirmPaymentResponse {
        success: result.success,
        applicant: result.applicant,
    }))
}

/// POST /api/webhooks/stripe - Signature-verified payment notifications
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            ApiError::bad_request("Stripe-Signature", "Missing Stripe-Signature header")
        })?;

    let result = state
        .webhook_handler()
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature: signature.to_string(),
        })
        .await?;

    Ok(Json(WebhookResponse::from(result)))
}
