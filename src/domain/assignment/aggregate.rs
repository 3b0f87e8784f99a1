//! Mentor assignment record and the entrepreneur-keyed index over it.

use crate::domain::applicant::Applicant;
use crate::domain::foundation::{ApplicantId, AssignmentId, Role, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::{AssignmentError, PortfolioNumber};

/// The current (mentor, portfolio) pair for one entrepreneur.
///
/// # Invariants
///
/// - At most one record per `entrepreneur_id`
/// - `id` survives reassignment, so notes stay attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorAssignment {
    pub id: AssignmentId,
    pub entrepreneur_id: ApplicantId,
    pub mentor_id: ApplicantId,
    /// Denormalized for badge rendering.
    pub mentor_name: String,
    pub portfolio_number: PortfolioNumber,
    pub assigned_at: Timestamp,
}

impl MentorAssignment {
    /// Builds the record that replaces `previous` (if any) for this entrepreneur.
    ///
    /// Checks every precondition up front so nothing is partially applied.
    pub fn record(
        previous: Option<&MentorAssignment>,
        entrepreneur: &Applicant,
        mentor: &Applicant,
        portfolio_number: i64,
    ) -> Result<Self, AssignmentError> {
        if entrepreneur.role != Role::Entrepreneur {
            return Err(AssignmentError::NotAnEntrepreneur(entrepreneur.id));
        }
        if mentor.role != Role::Mentor {
            return Err(AssignmentError::NotAMentor(mentor.id));
        }
        if !mentor.is_approved_mentor() {
            return Err(AssignmentError::mentor_not_approved(mentor.id));
        }
        let portfolio_number = PortfolioNumber::new(portfolio_number)?;

        Ok(Self {
            id: previous.map(|p| p.id).unwrap_or_default(),
            entrepreneur_id: entrepreneur.id,
            mentor_id: mentor.id,
            mentor_name: mentor.name.clone(),
            portfolio_number,
            assigned_at: Timestamp::now(),
        })
    }

    pub fn badge(&self) -> AssignmentBadge {
        AssignmentBadge::Assigned {
            mentor_name: self.mentor_name.clone(),
            portfolio_number: self.portfolio_number,
        }
    }
}

/// Badge shown next to an entrepreneur on the dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssignmentBadge {
    Assigned {
        mentor_name: String,
        portfolio_number: PortfolioNumber,
    },
    Unassigned,
}

impl fmt::Display for AssignmentBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentBadge::Assigned {
                mentor_name,
                portfolio_number,
            } => write!(f, "Mentor {} - Portfolio {}", mentor_name, portfolio_number),
            AssignmentBadge::Unassigned => f.write_str("No Mentor Assigned"),
        }
    }
}

/// Reverse lookup from entrepreneur to current assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentIndex {
    by_entrepreneur: HashMap<ApplicantId, MentorAssignment>,
}

impl AssignmentIndex {
    /// Builds the index from a listing.
    ///
    /// Should a listing ever contain two rows for one entrepreneur, the most
    /// recently assigned wins.
    pub fn from_assignments(assignments: impl IntoIterator<Item = MentorAssignment>) -> Self {
        let mut by_entrepreneur: HashMap<ApplicantId, MentorAssignment> = HashMap::new();
        for assignment in assignments {
            match by_entrepreneur.get(&assignment.entrepreneur_id) {
                Some(existing) if existing.assigned_at > assignment.assigned_at => {}
                _ => {
                    by_entrepreneur.insert(assignment.entrepreneur_id, assignment);
                }
            }
        }
        Self { by_entrepreneur }
    }

    pub fn get(&self, entrepreneur_id: &ApplicantId) -> Option<&MentorAssignment> {
        self.by_entrepreneur.get(entrepreneur_id)
    }

    pub fn has_mentor(&self, entrepreneur_id: &ApplicantId) -> bool {
        self.by_entrepreneur.contains_key(entrepreneur_id)
    }

    pub fn badge_for(&self, entrepreneur_id: &ApplicantId) -> AssignmentBadge {
        self.get(entrepreneur_id)
            .map(MentorAssignment::badge)
            .unwrap_or(AssignmentBadge::Unassigned)
    }

    /// Entrepreneurs currently assigned to `mentor_id`, ordered by portfolio.
    pub fn for_mentor(&self, mentor_id: &ApplicantId) -> Vec<&MentorAssignment> {
        let mut list: Vec<_> = self
            .by_entrepreneur
            .values()
            .filter(|a| &a.mentor_id == mentor_id)
            .collect();
        list.sort_by_key(|a| (a.portfolio_number, a.assigned_at));
        list
    }

    pub fn len(&self) -> usize {
        self.by_entrepreneur.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_entrepreneur.is_empty()
    }

    pub fn into_map(self) -> HashMap<ApplicantId, MentorAssignment> {
        self.by_entrepreneur
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::applicant::{
        ApplicantPayload, EntrepreneurPayload, MentorPayload, ReviewAction,
    };
    use crate::domain::foundation::EmailAddress;

    fn entrepreneur(email: &str) -> Applicant {
        Applicant::submit(
            EmailAddress::new(email).unwrap(),
            "Erin",
            ApplicantPayload::Entrepreneur(EntrepreneurPayload::default()),
        )
        .unwrap()
    }

    fn mentor(email: &str, name: &str, approved: bool) -> Applicant {
        let mut m = Applicant::submit(
            EmailAddress::new(email).unwrap(),
            name,
            ApplicantPayload::Mentor(MentorPayload {
                expertise: vec!["growth".into()],
                ..Default::default()
            }),
        )
        .unwrap();
        if approved {
            m.review(ReviewAction::Approve).unwrap();
        }
        m
    }

    #[test]
    fn record_requires_approved_mentor() {
        let e = entrepreneur("e@x.io");
        let m = mentor("m@x.io", "Max", false);
        assert_eq!(
            MentorAssignment::record(None, &e, &m, 3),
            Err(AssignmentError::MentorNotApproved(m.id))
        );
    }

    #[test]
    fn record_rejects_out_of_range_portfolio() {
        let e = entrepreneur("e@x.io");
        let m = mentor("m@x.io", "Max", true);
        assert_eq!(
            MentorAssignment::record(None, &e, &m, 11),
            Err(AssignmentError::InvalidPortfolioNumber(11))
        );
    }

    #[test]
    fn record_rejects_swapped_roles() {
        let e = entrepreneur("e@x.io");
        let m = mentor("m@x.io", "Max", true);
        assert_eq!(
            MentorAssignment::record(None, &m, &m, 1),
            Err(AssignmentError::NotAnEntrepreneur(m.id))
        );
        assert_eq!(
            MentorAssignment::record(None, &e, &e, 1),
            Err(AssignmentError::NotAMentor(e.id))
        );
    }

    #[test]
    fn reassignment_keeps_assignment_id() {
        let e = entrepreneur("e@x.io");
        let m1 = mentor("m1@x.io", "Max", true);
        let m2 = mentor("m2@x.io", "Mia", true);

        let first = MentorAssignment::record(None, &e, &m1, 3).unwrap();
        let second = MentorAssignment::record(Some(&first), &e, &m2, 1).unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.mentor_id, m2.id);
        assert_eq!(second.portfolio_number.value(), 1);
        assert_eq!(second.mentor_name, "Mia");
    }

    #[test]
    fn badge_renders_assigned_and_unassigned() {
        let e = entrepreneur("e@x.io");
        let m = mentor("m@x.io", "Max", true);
        let a = MentorAssignment::record(None, &e, &m, 3).unwrap();
        let index = AssignmentIndex::from_assignments(vec![a]);

        assert_eq!(index.badge_for(&e.id).to_string(), "Mentor Max - Portfolio 3");
        assert_eq!(
            index.badge_for(&ApplicantId::new()).to_string(),
            "No Mentor Assigned"
        );
    }

    #[test]
    fn index_keeps_latest_row_per_entrepreneur() {
        let e = entrepreneur("e@x.io");
        let m1 = mentor("m1@x.io", "Max", true);
        let m2 = mentor("m2@x.io", "Mia", true);
        let mut old = MentorAssignment::record(None, &e, &m1, 3).unwrap();
        old.assigned_at = Timestamp::from_unix_secs(1_000);
        let mut new = MentorAssignment::record(None, &e, &m2, 1).unwrap();
        new.assigned_at = Timestamp::from_unix_secs(2_000);

        let index = AssignmentIndex::from_assignments(vec![new.clone(), old]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&e.id), Some(&new));
    }

    #[test]
    fn for_mentor_orders_by_portfolio() {
        let m = mentor("m@x.io", "Max", true);
        let e1 = entrepreneur("e1@x.io");
        let e2 = entrepreneur("e2@x.io");
        let a1 = MentorAssignment::record(None, &e1, &m, 7).unwrap();
        let a2 = MentorAssignment::record(None, &e2, &m, 2).unwrap();

        let index = AssignmentIndex::from_assignments(vec![a1, a2]);
        let numbers: Vec<u8> = index
            .for_mentor(&m.id)
            .iter()
            .map(|a| a.portfolio_number.value())
            .collect();
        assert_eq!(numbers, vec![2, 7]);
    }
}
