//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, roles, events and error types
//! that form the vocabulary of the marketplace domain.

mod auth;
mod email;
mod errors;
mod events;
mod ids;
mod role;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use email::EmailAddress;
pub use errors::{DomainError, ErrorCategory, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, SerializableDomainEvent};
pub use ids::{ApplicantId, AssignmentId, MessageId, NoteId, ThreadId};
pub use role::{ActorRole, Role};
pub use state_machine::{IllegalTransition, StateMachine};
pub use timestamp::Timestamp;
