//! Entrepreneur access tiers.

use serde::{Deserialize, Serialize};

/// Access tier derived from review status, payment and the disabled flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Admin-disabled. Overrides everything else.
    Disabled,

    /// Rejected and unpaid.
    Declined,

    /// Awaiting an admin decision on the standard path.
    OnWaitingList,

    /// Community path, idea questionnaire not yet answered.
    CommunityFree,

    /// Community path with a submitted idea.
    CommunityMember,

    /// Approved, no mentor yet.
    ApprovedAwaitingMentor,

    /// Approved with a mentor assigned.
    ActiveMember,

    /// Paid. Does not require approval.
    FoundersCircle,
}

impl Tier {
    pub const ALL: [Tier; 8] = [
        Tier::Disabled,
        Tier::Declined,
        Tier::OnWaitingList,
        Tier::CommunityFree,
        Tier::CommunityMember,
        Tier::ApprovedAwaitingMentor,
        Tier::ActiveMember,
        Tier::FoundersCircle,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Disabled => "Disabled",
            Tier::Declined => "Declined",
            Tier::OnWaitingList => "On Waiting List",
            Tier::CommunityFree => "Community (Free)",
            Tier::CommunityMember => "Community Member",
            Tier::ApprovedAwaitingMentor => "Approved (Awaiting Mentor)",
            Tier::ActiveMember => "Active Member",
            Tier::FoundersCircle => "Founders Circle",
        }
    }

    /// Numeric access level. Higher rank = more features.
    ///
    /// Approved entrepreneurs sit at the community-member level.
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Disabled | Tier::Declined => 0,
            Tier::OnWaitingList => 1,
            Tier::CommunityFree => 2,
            Tier::CommunityMember | Tier::ApprovedAwaitingMentor | Tier::ActiveMember => 3,
            Tier::FoundersCircle => 4,
        }
    }

    pub fn at_least(&self, other: Tier) -> bool {
        self.rank() >= other.rank()
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Tier::FoundersCircle)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
