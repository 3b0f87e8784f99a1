//! Assignment audit events.
//!
//! The current assignment is overwritten in place; this event stream is the
//! append-only history of who was assigned when.

use crate::domain::foundation::{domain_event, ApplicantId, AssignmentId, EventId, Timestamp};
use serde::{Deserialize, Serialize};

use super::{MentorAssignment, PortfolioNumber};

/// Mentor and portfolio an entrepreneur held before a reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousAssignment {
    pub mentor_id: ApplicantId,
    pub mentor_name: String,
    pub portfolio_number: PortfolioNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecorded {
    pub event_id: EventId,
    pub assignment_id: AssignmentId,
    pub entrepreneur_id: ApplicantId,
    pub mentor_id: ApplicantId,
    pub mentor_name: String,
    pub portfolio_number: PortfolioNumber,
    pub previous: Option<PreviousAssignment>,
    pub recorded_at: Timestamp,
}

domain_event!(AssignmentRecorded => "assignment.recorded.v1", MentorAssignment(assignment_id), at recorded_at);

impl AssignmentRecorded {
    pub fn new(current: &MentorAssignment, previous: Option<&MentorAssignment>) -> Self {
        Self {
            event_id: EventId::new(),
            assignment_id: current.id,
            entrepreneur_id: current.entrepreneur_id,
            mentor_id: current.mentor_id,
            mentor_name: current.mentor_name.clone(),
            portfolio_number: current.portfolio_number,
            previous: previous.map(|p| PreviousAssignment {
                mentor_id: p.mentor_id,
                mentor_name: p.mentor_name.clone(),
                portfolio_number: p.portfolio_number,
            }),
            recorded_at: current.assigned_at,
        }
    }

    /// True when this event replaced an existing pair.
    pub fn is_reassignment(&self) -> bool {
        self.previous.is_some()
    }
}
