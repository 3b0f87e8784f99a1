//! Mentor-portfolio assignment handlers.

mod assign_mentor;
mod list_assignments;

pub use assign_mentor::{AssignMentorCommand, AssignMentorHandler, AssignMentorResult};
pub use list_assignments::{ListAssignmentsHandler, ListAssignmentsQuery, ListAssignmentsResult};
