//! Mentor-portfolio assignment domain module.
//!
//! Maps each entrepreneur to at most one (mentor, portfolio number) pair.

mod aggregate;
mod errors;
mod events;
mod portfolio;

pub use aggregate::{AssignmentBadge, AssignmentIndex, MentorAssignment};
pub use errors::AssignmentError;
pub use events::{AssignmentRecorded, PreviousAssignment};
pub use portfolio::PortfolioNumber;
