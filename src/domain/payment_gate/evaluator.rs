//! Tier evaluation.
//!
//! Pure, no I/O. Rules are checked in order and the first match wins:
//!
//! | disabled | payment | review state | tier |
//! |----------|---------|--------------|------|
//! | yes | any | any | Disabled |
//! | no | paid | any | FoundersCircle |
//! | no | unpaid | pre-approved, idea submitted | CommunityMember |
//! | no | unpaid | pre-approved, no idea | CommunityFree |
//! | no | unpaid | approved | ActiveMember / ApprovedAwaitingMentor |
//! | no | unpaid | submitted / pending | OnWaitingList |
//! | no | unpaid | rejected | Declined |

use crate::domain::applicant::{Applicant, ApplicationStatus, PaymentStatus};
use serde::{Deserialize, Serialize};

use super::Tier;

/// Review state as seen by the gate: application status plus the implicit
/// pre-approved sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    Submitted,
    Pending,
    PreApproved,
    Approved,
    Rejected,
}

impl ReviewState {
    pub fn of(applicant: &Applicant) -> Self {
        if applicant.is_pre_approved() {
            return ReviewState::PreApproved;
        }
        match applicant.status {
            ApplicationStatus::Submitted => ReviewState::Submitted,
            ApplicationStatus::Pending => ReviewState::Pending,
            ApplicationStatus::Approved => ReviewState::Approved,
            ApplicationStatus::Rejected => ReviewState::Rejected,
        }
    }
}

/// Everything the tier depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TierInputs {
    pub is_disabled: bool,
    pub payment_status: PaymentStatus,
    pub review_state: ReviewState,
    pub idea_submitted: bool,
    pub mentor_assigned: bool,
}

impl TierInputs {
    pub fn from_applicant(applicant: &Applicant, mentor_assigned: bool) -> Self {
        Self {
            is_disabled: applicant.is_disabled,
            payment_status: applicant.payment_status(),
            review_state: ReviewState::of(applicant),
            idea_submitted: applicant.idea_submitted(),
            mentor_assigned,
        }
    }

    pub fn evaluate(&self) -> Tier {
        if self.is_disabled {
            return Tier::Disabled;
        }
        if self.payment_status.is_paid() {
            return Tier::FoundersCircle;
        }
        match self.review_state {
            ReviewState::PreApproved if self.idea_submitted => Tier::CommunityMember,
            ReviewState::PreApproved => Tier::CommunityFree,
            ReviewState::Approved if self.mentor_assigned => Tier::ActiveMember,
            ReviewState::Approved => Tier::ApprovedAwaitingMentor,
            ReviewState::Submitted | ReviewState::Pending => Tier::OnWaitingList,
            ReviewState::Rejected => Tier::Declined,
        }
    }
}

/// Derives the tier of an applicant.
pub fn compute_tier(applicant: &Applicant, mentor_assigned: bool) -> Tier {
    TierInputs::from_applicant(applicant, mentor_assigned).evaluate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::applicant::{
        ApplicantPayload, EntrepreneurPayload, ReviewAction,
    };
    use crate::domain::foundation::EmailAddress;
    use proptest::prelude::*;

    fn inputs(review_state: ReviewState) -> TierInputs {
        TierInputs {
            is_disabled: false,
            payment_status: PaymentStatus::Unpaid,
            review_state,
            idea_submitted: false,
            mentor_assigned: false,
        }
    }

    fn entrepreneur(pre_approved: bool, idea: bool) -> Applicant {
        let mut payload = EntrepreneurPayload {
            pre_approved,
            ..Default::default()
        };
        if idea {
            payload
                .idea_answers
                .insert("problem".into(), "Small farms lack credit".into());
        }
        Applicant::submit(
            EmailAddress::new("e@x.io").unwrap(),
            "Erin",
            ApplicantPayload::Entrepreneur(payload),
        )
        .unwrap()
    }

    #[test]
    fn disabled_overrides_payment() {
        let t = TierInputs {
            is_disabled: true,
            payment_status: PaymentStatus::Paid,
            ..inputs(ReviewState::Approved)
        };
        assert_eq!(t.evaluate(), Tier::Disabled);
    }

    #[test]
    fn paid_without_approval_is_founders_circle() {
        let t = TierInputs {
            payment_status: PaymentStatus::Paid,
            ..inputs(ReviewState::Submitted)
        };
        assert_eq!(t.evaluate(), Tier::FoundersCircle);
    }

    #[test]
    fn community_path_depends_on_idea() {
        assert_eq!(inputs(ReviewState::PreApproved).evaluate(), Tier::CommunityFree);
        let with_idea = TierInputs {
            idea_submitted: true,
            ..inputs(ReviewState::PreApproved)
        };
        assert_eq!(with_idea.evaluate(), Tier::CommunityMember);
    }

    #[test]
    fn approved_depends_on_mentor() {
        assert_eq!(
            inputs(ReviewState::Approved).evaluate(),
            Tier::ApprovedAwaitingMentor
        );
        let assigned = TierInputs {
            mentor_assigned: true,
            ..inputs(ReviewState::Approved)
        };
        assert_eq!(assigned.evaluate(), Tier::ActiveMember);
    }

    #[test]
    fn undecided_is_waiting_list_and_rejected_is_declined() {
        assert_eq!(inputs(ReviewState::Submitted).evaluate(), Tier::OnWaitingList);
        assert_eq!(inputs(ReviewState::Pending).evaluate(), Tier::OnWaitingList);
        assert_eq!(inputs(ReviewState::Rejected).evaluate(), Tier::Declined);
    }

    #[test]
    fn compute_tier_reads_applicant_record() {
        assert_eq!(compute_tier(&entrepreneur(false, false), false), Tier::OnWaitingList);
        assert_eq!(compute_tier(&entrepreneur(true, false), false), Tier::CommunityFree);
        assert_eq!(compute_tier(&entrepreneur(true, true), false), Tier::CommunityMember);

        let mut approved = entrepreneur(true, true);
        approved.review(ReviewAction::Approve).unwrap();
        assert_eq!(compute_tier(&approved, true), Tier::ActiveMember);

        approved.mark_paid().unwrap();
        assert_eq!(compute_tier(&approved, true), Tier::FoundersCircle);

        approved.set_disabled(true);
        assert_eq!(compute_tier(&approved, true), Tier::Disabled);
    }

    fn any_inputs() -> impl Strategy<Value = TierInputs> {
        (
            any::<bool>(),
            any::<bool>(),
            prop::sample::select(vec![
                ReviewState::Submitted,
                ReviewState::Pending,
                ReviewState::PreApproved,
                ReviewState::Approved,
                ReviewState::Rejected,
            ]),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(is_disabled, paid, review_state, idea_submitted, mentor_assigned)| {
                TierInputs {
                    is_disabled,
                    payment_status: if paid {
                        PaymentStatus::Paid
                    } else {
                        PaymentStatus::Unpaid
                    },
                    review_state,
                    idea_submitted,
                    mentor_assigned,
                }
            })
    }

    proptest! {
        #[test]
        fn evaluation_is_deterministic(inputs in any_inputs()) {
            prop_assert_eq!(inputs.evaluate(), inputs.evaluate());
        }

        #[test]
        fn disabled_always_wins(inputs in any_inputs()) {
            let disabled = TierInputs { is_disabled: true, ..inputs };
            prop_assert_eq!(disabled.evaluate(), Tier::Disabled);
        }

        #[test]
        fn founders_circle_iff_enabled_and_paid(inputs in any_inputs()) {
            let expected = !inputs.is_disabled && inputs.payment_status.is_paid();
            prop_assert_eq!(inputs.evaluate() == Tier::FoundersCircle, expected);
        }
    }
}
