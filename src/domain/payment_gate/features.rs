//! Feature visibility per tier.

use serde::{Deserialize, Serialize};

use super::Tier;

/// Which entrepreneur-facing features are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVisibility {
    pub tier: Tier,
    /// Any dashboard content at all.
    pub dashboard: bool,
    /// Coaches directory. Needs community-member level or above.
    pub coaches_list: bool,
    /// Messaging the assigned mentor. Needs Founders Circle and an assignment.
    pub mentor_messaging: bool,
    /// Mentor notes for the entrepreneur's assignment.
    pub mentor_notes: bool,
    /// Offer the Founders Circle checkout.
    pub upgrade_offer: bool,
}

impl FeatureVisibility {
    pub fn for_tier(tier: Tier, mentor_assigned: bool) -> Self {
        let enabled = tier != Tier::Disabled;
        Self {
            tier,
            dashboard: enabled,
            coaches_list: tier.at_least(Tier::CommunityMember),
            mentor_messaging: tier == Tier::FoundersCircle && mentor_assigned,
            mentor_notes: enabled && mentor_assigned,
            upgrade_offer: enabled && !tier.is_paid(),
        }
    }
}
