//! Axum router configuration for applicant, admin review and payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    approve_applicant, confirm_payment, create_checkout, disable_applicant, enable_applicant,
    handle_stripe_webhook, list_applicants, reject_applicant, resubmit_application,
    rewrite_answers, submit_application,
};

/// Applicant routes, mounted at `/applicants`.
///
/// - `POST /` - Submit an application
/// - `POST /:id/resubmit` - Resubmit a rejected application
/// - `POST /rewrite-answers` - AI rewrite of questionnaire answers
pub fn applicant_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_application))
        .route("/rewrite-answers", post(rewrite_answers))
        .route("/:id/resubmit", post(resubmit_application))
}

/// Admin applicant routes, mounted at `/admin/applicants`.
pub fn admin_applicant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_applicants))
        .route("/:id/approve", post(approve_applicant))
        .route("/:id/reject", post(reject_applicant))
        .route("/:id/disable", post(disable_applicant))
        .route("/:id/enable", post(enable_applicant))
}

/// Payment routes, mounted at `/payments`.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/confirm", post(confirm_payment))
}

/// Webhook routes, mounted at `/webhooks`. No session; verified by signature.
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/stripe", post(handle_stripe_webhook))
}
