//! In-memory repository adapters.
//!
//! `RwLock`-guarded maps implementing every repository port. Used by the
//! integration tests and by the binary when no database URL is configured.

mod applicant_repository;
mod assignment_repository;
mod messaging_repository;

pub use applicant_repository::InMemoryApplicantRepository;
pub use assignment_repository::InMemoryAssignmentRepository;
pub use messaging_repository::{
    InMemoryMessageRepository, InMemoryNoteRepository, InMemoryThreadRepository,
};
