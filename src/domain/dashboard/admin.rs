//! Admin dashboard projection.
//!
//! Derived purely from a fetched snapshot; nothing here is cached between
//! refreshes, so badges can never outlive the data they came from.

use crate::domain::applicant::{Applicant, ApplicationStatus};
use crate::domain::assignment::{AssignmentBadge, AssignmentIndex};
use crate::domain::foundation::{ApplicantId, EmailAddress, Role, Timestamp};
use crate::domain::messaging::UnreadCount;
use crate::domain::payment_gate::{compute_tier, Tier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filters applied to the applicant table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminFilter {
    pub role: Option<Role>,
    pub status: Option<ApplicationStatus>,
}

impl AdminFilter {
    fn matches(&self, applicant: &Applicant) -> bool {
        self.role.map_or(true, |r| applicant.role == r)
            && self.status.map_or(true, |s| applicant.status == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRow {
    pub id: ApplicantId,
    pub role: Role,
    pub name: String,
    pub email: EmailAddress,
    pub status: ApplicationStatus,
    pub is_resubmitted: bool,
    pub is_disabled: bool,
    pub submitted_at: Timestamp,
    /// Entrepreneurs only.
    pub tier: Option<Tier>,
    /// Entrepreneurs only.
    pub assignment: Option<AssignmentBadge>,
    /// Mentors only: entrepreneurs currently in their portfolios.
    pub portfolio_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub submitted: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub resubmitted: usize,
    pub disabled: usize,
}

impl StatusCounts {
    fn add(&mut self, applicant: &Applicant) {
        match applicant.status {
            ApplicationStatus::Submitted => self.submitted += 1,
            ApplicationStatus::Pending => self.pending += 1,
            ApplicationStatus::Approved => self.approved += 1,
            ApplicationStatus::Rejected => self.rejected += 1,
        }
        if applicant.is_resubmitted {
            self.resubmitted += 1;
        }
        if applicant.is_disabled {
            self.disabled += 1;
        }
    }

    /// Applications still waiting for a decision.
    pub fn awaiting_review(&self) -> usize {
        self.submitted + self.pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDashboard {
    /// Filtered rows, newest submission first.
    pub rows: Vec<ApplicantRow>,
    /// Unfiltered counts per role.
    pub counts: BTreeMap<Role, StatusCounts>,
    pub unread: UnreadCount,
}

impl AdminDashboard {
    pub fn project(
        applicants: &[Applicant],
        assignments: &AssignmentIndex,
        unread: UnreadCount,
        filter: AdminFilter,
    ) -> Self {
        let mut counts: BTreeMap<Role, StatusCounts> =
            Role::ALL.iter().map(|r| (*r, StatusCounts::default())).collect();
        for applicant in applicants {
            counts.entry(applicant.role).or_default().add(applicant);
        }

        let mut rows: Vec<ApplicantRow> = applicants
            .iter()
            .filter(|a| filter.matches(a))
            .map(|a| row_for(a, assignments))
            .collect();
        rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Self {
            rows,
            counts,
            unread,
        }
    }
}

fn row_for(applicant: &Applicant, assignments: &AssignmentIndex) -> ApplicantRow {
    let (tier, assignment) = if applicant.role == Role::Entrepreneur {
        let assigned = assignments.has_mentor(&applicant.id);
        (
            Some(compute_tier(applicant, assigned)),
            Some(assignments.badge_for(&applicant.id)),
        )
    } else {
        (None, None)
    };
    let portfolio_size =
        (applicant.role == Role::Mentor).then(|| assignments.for_mentor(&applicant.id).len());

    ApplicantRow {
        id: applicant.id,
        role: applicant.role,
        name: applicant.name.clone(),
        email: applicant.email.clone(),
        status: applicant.status,
        is_resubmitted: applicant.is_resubmitted,
        is_disabled: applicant.is_disabled,
        submitted_at: applicant.submitted_at,
        tier,
        assignment,
        portfolio_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::applicant::{
        ApplicantPayload, CoachPayload, EntrepreneurPayload, MentorPayload, ReviewAction,
    };
    use crate::domain::assignment::MentorAssignment;

    fn applicant(email: &str, payload: ApplicantPayload, submitted: i64) -> Applicant {
        let mut a = Applicant::submit(EmailAddress::new(email).unwrap(), "Name", payload).unwrap();
        a.submitted_at = Timestamp::from_unix_secs(submitted);
        a
    }

    fn entrepreneur(email: &str, submitted: i64) -> Applicant {
        applicant(
            email,
            ApplicantPayload::Entrepreneur(EntrepreneurPayload::default()),
            submitted,
        )
    }

    fn approved_mentor(email: &str) -> Applicant {
        let mut m = applicant(
            email,
            ApplicantPayload::Mentor(MentorPayload {
                expertise: vec!["ops".into()],
                ..Default::default()
            }),
            0,
        );
        m.review(ReviewAction::Approve).unwrap();
        m
    }

    #[test]
    fn rows_carry_tier_and_badge_for_entrepreneurs() {
        let mut e1 = entrepreneur("e1@x.io", 100);
        e1.review(ReviewAction::Approve).unwrap();
        let e2 = entrepreneur("e2@x.io", 200);
        let m = approved_mentor("m@x.io");
        let index = AssignmentIndex::from_assignments(vec![
            MentorAssignment::record(None, &e1, &m, 2).unwrap(),
        ]);

        let dash = AdminDashboard::project(
            &[e1.clone(), e2.clone(), m.clone()],
            &index,
            UnreadCount::default(),
            AdminFilter {
                role: Some(Role::Entrepreneur),
                status: None,
            },
        );

        assert_eq!(dash.rows.len(), 2);
        assert_eq!(dash.rows[0].id, e2.id, "newest first");
        assert_eq!(dash.rows[0].tier, Some(Tier::OnWaitingList));
        assert_eq!(dash.rows[0].assignment, Some(AssignmentBadge::Unassigned));
        assert_eq!(dash.rows[1].tier, Some(Tier::ActiveMember));
        assert_eq!(
            dash.rows[1].assignment.as_ref().map(|b| b.to_string()),
            Some("Mentor Name - Portfolio 2".to_string())
        );
    }

    #[test]
    fn counts_ignore_filter_and_track_flags() {
        let mut e1 = entrepreneur("e1@x.io", 1);
        e1.review(ReviewAction::Reject).unwrap();
        e1.resubmit(None).unwrap();
        let mut e2 = entrepreneur("e2@x.io", 2);
        e2.set_disabled(true);
        let coach = applicant(
            "c@x.io",
            ApplicantPayload::Coach(CoachPayload {
                specialties: vec!["sales".into()],
                ..Default::default()
            }),
            3,
        );

        let dash = AdminDashboard::project(
            &[e1, e2, coach],
            &AssignmentIndex::default(),
            UnreadCount::default(),
            AdminFilter {
                role: Some(Role::Coach),
                status: None,
            },
        );

        assert_eq!(dash.rows.len(), 1);
        let e = dash.counts[&Role::Entrepreneur];
        assert_eq!(e.pending, 1);
        assert_eq!(e.submitted, 1);
        assert_eq!(e.resubmitted, 1);
        assert_eq!(e.disabled, 1);
        assert_eq!(e.awaiting_review(), 2);
        assert_eq!(dash.counts[&Role::Investor], StatusCounts::default());
    }

    #[test]
    fn mentor_rows_report_portfolio_size() {
        let e = entrepreneur("e@x.io", 1);
        let m = approved_mentor("m@x.io");
        let index = AssignmentIndex::from_assignments(vec![
            MentorAssignment::record(None, &e, &m, 1).unwrap(),
        ]);
        let dash = AdminDashboard::project(
            &[m],
            &index,
            UnreadCount::default(),
            AdminFilter::default(),
        );
        assert_eq!(dash.rows[0].portfolio_size, Some(1));
        assert_eq!(dash.rows[0].tier, None);
    }

    #[test]
    fn status_filter_narrows_rows() {
        let mut approved = entrepreneur("a@x.io", 1);
        approved.review(ReviewAction::Approve).unwrap();
        let waiting = entrepreneur("w@x.io", 2);
        let dash = AdminDashboard::project(
            &[approved.clone(), waiting],
            &AssignmentIndex::default(),
            UnreadCount::default(),
            AdminFilter {
                role: None,
                status: Some(ApplicationStatus::Approved),
            },
        );
        assert_eq!(dash.rows.len(), 1);
        assert_eq!(dash.rows[0].id, approved.id);
    }
}
