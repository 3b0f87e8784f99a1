//! Applicant HTTP adapter: submission, admin review and payments.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use routes::{admin_applicant_routes, applicant_routes, payment_routes, webhook_routes};
