//! Entrepreneur dashboard projection.

use crate::domain::applicant::{Applicant, ApplicantPayload, ApplicationStatus};
use crate::domain::assignment::{MentorAssignment, PortfolioNumber};
use crate::domain::foundation::{ApplicantId, AssignmentId, EmailAddress, Role};
use crate::domain::messaging::{MentorNote, UnreadCount};
use crate::domain::payment_gate::{compute_tier, FeatureVisibility, Tier};
use serde::{Deserialize, Serialize};

/// The entrepreneur's assigned mentor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyMentor {
    pub assignment_id: AssignmentId,
    pub mentor_id: ApplicantId,
    pub mentor_name: String,
    /// Present only when mentor messaging is unlocked.
    pub mentor_email: Option<EmailAddress>,
    pub portfolio_number: PortfolioNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachCard {
    pub id: ApplicantId,
    pub name: String,
    pub email: EmailAddress,
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrepreneurDashboard {
    pub applicant_id: ApplicantId,
    pub name: String,
    pub status: ApplicationStatus,
    pub tier: Tier,
    pub features: FeatureVisibility,
    pub my_mentor: Option<MyMentor>,
    /// Empty unless notes are unlocked.
    pub notes: Vec<MentorNote>,
    pub open_notes: usize,
    /// Empty unless the coaches list is unlocked.
    pub coaches: Vec<CoachCard>,
    pub unread: UnreadCount,
}

/// Inputs fetched for one refresh.
#[derive(Debug, Clone, Default)]
pub struct EntrepreneurSnapshot<'a> {
    pub assignment: Option<&'a MentorAssignment>,
    pub mentor: Option<&'a Applicant>,
    pub notes: &'a [MentorNote],
    pub coaches: &'a [Applicant],
    pub unread: UnreadCount,
}

impl EntrepreneurDashboard {
    pub fn project(applicant: &Applicant, snapshot: EntrepreneurSnapshot<'_>) -> Self {
        let assigned = snapshot.assignment.is_some();
        let tier = compute_tier(applicant, assigned);
        let features = FeatureVisibility::for_tier(tier, assigned);

        let my_mentor = snapshot.assignment.map(|a| MyMentor {
            assignment_id: a.id,
            mentor_id: a.mentor_id,
            mentor_name: a.mentor_name.clone(),
            mentor_email: snapshot
                .mentor
                .filter(|m| features.mentor_messaging && m.id == a.mentor_id)
                .map(|m| m.email.clone()),
            portfolio_number: a.portfolio_number,
        });

        let notes: Vec<MentorNote> = if features.mentor_notes {
            let mut notes = snapshot.notes.to_vec();
            notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            notes
        } else {
            Vec::new()
        };
        let open_notes = notes.iter().filter(|n| !n.completed).count();

        let coaches = if features.coaches_list {
            snapshot
                .coaches
                .iter()
                .filter(|c| {
                    c.role == Role::Coach
                        && c.status == ApplicationStatus::Approved
                        && !c.is_disabled
                })
                .map(|c| CoachCard {
                    id: c.id,
                    name: c.name.clone(),
                    email: c.email.clone(),
                    specialties: match &c.payload {
                        ApplicantPayload::Coach(p) => p.specialties.clone(),
                        _ => Vec::new(),
                    },
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            applicant_id: applicant.id,
            name: applicant.name.clone(),
            status: applicant.status,
            tier,
            features,
            my_mentor,
            notes,
            open_notes,
            coaches,
            unread: snapshot.unread,
        }
    }
}
