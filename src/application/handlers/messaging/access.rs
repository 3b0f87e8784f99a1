//! Who may act on an assignment's notes and threads.

use crate::domain::applicant::Applicant;
use crate::domain::assignment::{AssignmentIndex, MentorAssignment};
use crate::domain::foundation::{ActorRole, AssignmentId, AuthenticatedUser, Role};
use crate::domain::messaging::MessagingError;
use crate::domain::payment_gate::{compute_tier, FeatureVisibility};
use crate::ports::{ApplicantRepository, AssignmentRepository};

/// The actor's relationship to an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AssignmentParty {
    Admin,
    Mentor,
    Entrepreneur,
}

/// Loads the assignment and resolves the actor's side of it.
///
/// Actors on neither side get `Permission`.
pub(super) async fn resolve_party(
    applicants: &dyn ApplicantRepository,
    assignments: &dyn AssignmentRepository,
    assignment_id: &AssignmentId,
    actor: &AuthenticatedUser,
) -> Result<(MentorAssignment, AssignmentParty), MessagingError> {
    let assignment = assignments
        .find_by_id(assignment_id)
        .await?
        .ok_or(MessagingError::AssignmentNotFound(*assignment_id))?;

    if actor.is_admin() {
        return Ok((assignment, AssignmentParty::Admin));
    }

    let (candidate, party) = match actor.role {
        ActorRole::Mentor => (assignment.mentor_id, AssignmentParty::Mentor),
        ActorRole::Entrepreneur => (assignment.entrepreneur_id, AssignmentParty::Entrepreneur),
        _ => {
            return Err(MessagingError::permission(
                "only the assignment's mentor or entrepreneur may do this",
            ))
        }
    };
    let holder = applicants.find_by_id(&candidate).await?;
    match holder {
        Some(applicant) if applicant.email == actor.email => Ok((assignment, party)),
        _ => Err(MessagingError::permission(
            "not a party to this assignment",
        )),
    }
}

/// Entrepreneur and mentor may message each other only when they are
/// assigned to each other and the entrepreneur's tier unlocks messaging.
pub(super) fn ensure_messaging_unlocked(
    entrepreneur: &Applicant,
    mentor: &Applicant,
    assignments: &AssignmentIndex,
) -> Result<(), MessagingError> {
    if entrepreneur.role != Role::Entrepreneur || mentor.role != Role::Mentor {
        return Err(MessagingError::permission(
            "threads run between an entrepreneur and a mentor",
        ));
    }
    let assigned = match assignments.get(&entrepreneur.id) {
        Some(a) if a.mentor_id == mentor.id => true,
        _ => {
            return Err(MessagingError::permission(
                "mentor is not assigned to this entrepreneur",
            ))
        }
    };
    let tier = compute_tier(entrepreneur, assigned);
    if !FeatureVisibility::for_tier(tier, assigned).mentor_messaging {
        return Err(MessagingError::permission(format!(
            "mentor messaging is not available at the {} tier",
            tier.display_name()
        )));
    }
    Ok(())
}
