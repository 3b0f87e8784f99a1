//! Applicant audit events.

use crate::domain::foundation::{
    domain_event, ApplicantId, EmailAddress, EventId, Role, Timestamp,
};
use serde::{Deserialize, Serialize};

use super::ApplicationStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantSubmitted {
    pub event_id: EventId,
    pub applicant_id: ApplicantId,
    pub role: Role,
    pub email: EmailAddress,
    pub submitted_at: Timestamp,
}

domain_event!(ApplicantSubmitted => "applicant.submitted.v1", Applicant(applicant_id), at submitted_at);

/// An admin decision changed an application's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantReviewed {
    pub event_id: EventId,
    pub applicant_id: ApplicantId,
    pub role: Role,
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
    pub reviewed_at: Timestamp,
}

domain_event!(ApplicantReviewed => "applicant.reviewed.v1", Applicant(applicant_id), at reviewed_at);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantResubmitted {
    pub event_id: EventId,
    pub applicant_id: ApplicantId,
    pub resubmitted_at: Timestamp,
}

domain_event!(ApplicantResubmitted => "applicant.resubmitted.v1", Applicant(applicant_id), at resubmitted_at);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantAccessChanged {
    pub event_id: EventId,
    pub applicant_id: ApplicantId,
    pub disabled: bool,
    pub changed_at: Timestamp,
}

domain_event!(ApplicantAccessChanged => "applicant.access_changed.v1", Applicant(applicant_id), at changed_at);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmed {
    pub event_id: EventId,
    pub applicant_id: ApplicantId,
    pub email: EmailAddress,
    /// Provider session that settled the payment, when known.
    pub checkout_session_id: Option<String>,
    pub confirmed_at: Timestamp,
}

domain_event!(PaymentConfirmed => "applicant.payment_confirmed.v1", Applicant(applicant_id), at confirmed_at);
