//! Application status state machine.
//!
//! Status only moves on an explicit admin action (approve, reject) or an
//! applicant resubmission. There is no automatic escalation.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Freshly submitted, awaiting review.
    Submitted,

    /// Resubmitted after a rejection, awaiting review.
    Pending,

    /// Accepted. Terminal apart from the orthogonal disabled flag.
    Approved,

    /// Declined. The applicant may resubmit.
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Submitted,
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Returns true while the application awaits an admin decision.
    pub fn is_awaiting_review(&self) -> bool {
        matches!(self, ApplicationStatus::Submitted | ApplicationStatus::Pending)
    }
}

impl StateMachine for ApplicationStatus {
    fn successors(&self) -> &'static [Self] {
        use ApplicationStatus::*;
        match self {
            Submitted | Pending => &[Approved, Rejected],
            // Resubmission
            Rejected => &[Pending],
            Approved => &[],
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "submitted" => Ok(ApplicationStatus::Submitted),
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// Admin review decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn target_status(&self) -> ApplicationStatus {
        match self {
            ReviewAction::Approve => ApplicationStatus::Approved,
            ReviewAction::Reject => ApplicationStatus::Rejected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Approve => "approve",
            ReviewAction::Reject => "reject",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn submitted_and_pending_can_be_approved_or_rejected() {
        for from in [ApplicationStatus::Submitted, ApplicationStatus::Pending] {
            assert_eq!(
                from.transition_to(ApplicationStatus::Approved),
                Ok(ApplicationStatus::Approved)
            );
            assert_eq!(
                from.transition_to(ApplicationStatus::Rejected),
                Ok(ApplicationStatus::Rejected)
            );
        }
    }

    #[test]
    fn rejected_can_only_move_to_pending() {
        let status = ApplicationStatus::Rejected;
        assert_eq!(status.successors(), &[ApplicationStatus::Pending]);
        assert!(status.transition_to(ApplicationStatus::Approved).is_err());
    }

    #[test]
    fn approved_is_terminal() {
        assert!(ApplicationStatus::Approved.is_terminal());
        assert!(ApplicationStatus::Approved
            .transition_to(ApplicationStatus::Pending)
            .is_err());
    }

    #[test]
    fn status_parses_and_displays() {
        for status in ApplicationStatus::ALL {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ApplicationStatus>().is_err());
    }

    fn any_status() -> impl Strategy<Value = ApplicationStatus> {
        prop::sample::select(ApplicationStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn transition_to_agrees_with_can_transition_to(from in any_status(), to in any_status()) {
            prop_assert_eq!(from.can_transition_to(&to), from.transition_to(to).is_ok());
        }

        #[test]
        fn nothing_leaves_approved_and_nothing_reaches_submitted(from in any_status(), to in any_status()) {
            if from == ApplicationStatus::Approved || to == ApplicationStatus::Submitted {
                prop_assert!(!from.can_transition_to(&to));
            }
        }
    }
}
