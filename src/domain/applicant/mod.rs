//! Applicant domain module.
//!
//! Application records for all four roles and the status transition engine.
//!
//! # Module Structure
//!
//! - `aggregate` - Applicant record and its lifecycle operations
//! - `status` - ApplicationStatus state machine and review actions
//! - `payload` - Role-tagged application payloads
//! - `errors` - ApplicantError
//! - `events` - Audit events

mod aggregate;
mod errors;
mod events;
mod payload;
mod status;

pub use aggregate::{Applicant, Change};
pub use errors::ApplicantError;
pub use events::{
    ApplicantAccessChanged, ApplicantResubmitted, ApplicantReviewed, ApplicantSubmitted,
    PaymentConfirmed,
};
pub use payload::{
    ApplicantPayload, CoachPayload, EntrepreneurPayload, InvestorPayload, MentorPayload,
    PaymentStatus,
};
pub use status::{ApplicationStatus, ReviewAction};
