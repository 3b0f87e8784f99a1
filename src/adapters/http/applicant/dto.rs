//! Request and response bodies for applicant and payment endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::application::handlers::{HandlePaymentWebhookResult, RewrittenAnswer};
use crate::domain::applicant::{Applicant, ApplicantPayload, Change};
use crate::domain::foundation::{ApplicantId, Role};
use crate::ports::CheckoutSession;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// `POST /applicants`. The role comes from the payload tag.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitApplicationRequest {
    /// Display name; defaults to the session name.
    #[serde(default)]
    pub name: Option<String>,
    pub application: ApplicantPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResubmitApplicationRequest {
    #[serde(default)]
    pub application: Option<ApplicantPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListApplicantsParams {
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewriteAnswersRequest {
    pub answers: BTreeMap<String, String>,
}

/// Optional overrides for the configured checkout redirect URLs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub success_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ApplicantResponse {
    pub applicant: Applicant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicantListResponse {
    pub applicants: Vec<Applicant>,
    pub total: usize,
}

/// Result of an admin action; `changed` is false for a repeated action.
#[derive(Debug, Clone, Serialize)]
pub struct AdminActionResponse {
    pub applicant: Applicant,
    pub changed: bool,
}

impl AdminActionResponse {
    pub fn new(applicant: Applicant, change: Change) -> Self {
        Self {
            applicant,
            changed: change == Change::Applied,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RewriteAnswersResponse {
    pub answers: BTreeMap<String, RewrittenAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub checkout_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl From<CheckoutSession> for CheckoutResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            session_id: session.id,
            checkout_url: session.url,
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmPaymentResponse {
    pub success: bool,
    pub applicant: Applicant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookResponse {
    pub received: bool,
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_id: Option<ApplicantId>,
}

impl From<HandlePaymentWebhookResult> for WebhookResponse {
    fn from(result: HandlePaymentWebhookResult) -> Self {
        let (outcome, applicant_id) = match result {
            HandlePaymentWebhookResult::PaymentRecorded { applicant_id } => {
                ("payment_recorded", Some(applicant_id))
            }
            HandlePaymentWebhookResult::AlreadyPaid { applicant_id } => {
                ("already_paid", Some(applicant_id))
            }
            HandlePaymentWebhookResult::Pending => ("pending", None),
            HandlePaymentWebhookResult::Ignored => ("ignored", None),
        };
        Self {
            received: true,
            outcome: outcome.to_string(),
            applicant_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_reads_role_tag() {
        let request: SubmitApplicationRequest = serde_json::from_value(serde_json::json!({
            "application": { "role": "mentor", "expertise": ["pricing"] }
        }))
        .unwrap();

        assert_eq!(request.application.role(), Role::Mentor);
        assert!(request.name.is_none());
    }

    #[test]
    fn webhook_response_names_outcome() {
        let id = ApplicantId::new();
        let response =
            WebhookResponse::from(HandlePaymentWebhookResult::PaymentRecorded { applicant_id: id });

        assert_eq!(response.outcome, "payment_recorded");
        assert_eq!(response.applicant_id, Some(id));
        assert_eq!(
            WebhookResponse::from(HandlePaymentWebhookResult::Ignored).outcome,
            "ignored"
        );
    }
}
