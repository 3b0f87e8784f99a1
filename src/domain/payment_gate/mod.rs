//! Payment gate: derives an entrepreneur's tier and the features it unlocks.

mod evaluator;
mod features;
mod tier;

pub use evaluator::{compute_tier, ReviewState, TierInputs};
pub use features::FeatureVisibility;
pub use tier::Tier;
