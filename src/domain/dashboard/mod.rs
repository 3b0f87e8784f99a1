//! Dashboard read models.
//!
//! Pure projections recomputed from each fetched snapshot.

mod admin;
mod entrepreneur;

pub use admin::{AdminDashboard, AdminFilter, ApplicantRow, StatusCounts};
pub use entrepreneur::{CoachCard, EntrepreneurDashboard, EntrepreneurSnapshot, MyMentor};
