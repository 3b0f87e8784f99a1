//! Applicant handlers.
//!
//! ## Commands
//! - Submitting, reviewing and resubmitting applications
//! - Disabling/enabling applicants
//! - Founders Circle checkout, confirmation and webhooks
//! - AI rewrite of questionnaire answers
//!
//! ## Queries
//! - List applicants by role

mod confirm_payment;
mod create_checkout;
mod handle_stripe_webhook;
mod list_applicants;
mod resubmit_application;
mod review_applicant;
mod rewrite_answers;
mod set_applicant_access;
mod submit_application;

// Commands
pub use confirm_payment::{ConfirmPaymentCommand, ConfirmPaymentHandler, ConfirmPaymentResult};
pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
pub use handle_stripe_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use resubmit_application::{
    ResubmitApplicationCommand, ResubmitApplicationHandler, ResubmitApplicationResult,
};
pub use review_applicant::{ReviewApplicantCommand, ReviewApplicantHandler, ReviewApplicantResult};
pub use rewrite_answers::{
    RewriteAnswersCommand, RewriteAnswersHandler, RewriteAnswersResult, RewrittenAnswer,
};
pub use set_applicant_access::{
    SetApplicantAccessCommand, SetApplicantAccessHandler, SetApplicantAccessResult,
};
pub use submit_application::{
    SubmitApplicationCommand, SubmitApplicationHandler, SubmitApplicationResult,
};

// Queries
pub use list_applicants::{ListApplicantsHandler, ListApplicantsQuery, ListApplicantsResult};
