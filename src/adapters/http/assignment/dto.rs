//! Request and response bodies for assignment endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::assignment::MentorAssignment;
use crate::domain::foundation::ApplicantId;

#[derive(Debug, Clone, Deserialize)]
pub struct AssignMentorRequest {
    pub entrepreneur_id: ApplicantId,
    pub mentor_id: ApplicantId,
    /// Validated into 1..=10 by the handler.
    pub portfolio_number: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignMentorResponse {
    pub assignment: MentorAssignment,
    /// The assignment this one replaced, if any.
    pub previous: Option<MentorAssignment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentListResponse {
    pub assignments: Vec<MentorAssignment>,
}
