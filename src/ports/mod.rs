//! Ports - interfaces between the application core and the outside world.
//!
//! # Repositories
//!
//! - `ApplicantRepository` - Application records
//! - `AssignmentRepository` - Entrepreneur to mentor/portfolio map
//! - `MessageRepository`, `ThreadRepository`, `NoteRepository` - Messaging
//! - `ReadStateStore` - Per-viewer read state
//!
//! # External collaborators
//!
//! - `PaymentProvider` - Hosted checkout and webhooks
//! - `NotificationSender` - Transactional email
//! - `AnswerRewriter` - AI rewrite of questionnaire answers
//! - `AttachmentStorage` - File uploads
//! - `SessionValidator` - Session token validation
//! - `EventPublisher` - Audit events

mod answer_rewriter;
mod applicant_repository;
mod assignment_repository;
mod attachment_storage;
mod event_publisher;
mod messaging_repository;
mod notification_sender;
mod payment_provider;
mod read_state_store;
mod session_validator;

pub use answer_rewriter::{AnswerRewriter, RewriteError};
pub use applicant_repository::ApplicantRepository;
pub use assignment_repository::AssignmentRepository;
pub use attachment_storage::AttachmentStorage;
pub use event_publisher::EventPublisher;
pub use messaging_repository::{MessageRepository, NoteRepository, ThreadRepository};
pub use notification_sender::{Notification, NotificationSender};
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentConfirmation, PaymentError, PaymentErrorCode,
    PaymentProvider, WebhookEvent, WebhookEventKind,
};
pub use read_state_store::{ReadStateError, ReadStateStore};
pub use session_validator::SessionValidator;
