//! Messaging repository ports: one-shot messages, threads and mentor notes.

use crate::domain::foundation::{
    AssignmentId, DomainError, EmailAddress, NoteId, ThreadId, Timestamp,
};
use crate::domain::messaging::{Message, MessageThread, MentorNote, NoteResponse, ThreadEntry};
use async_trait::async_trait;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn save(&self, message: &Message) -> Result<Message, DomainError>;

    /// Messages sent to or from `email`, oldest first.
    async fn list_for(&self, email: &EmailAddress) -> Result<Vec<Message>, DomainError>;
}

#[async_trait]
pub trait ThreadRepository: Send + Sync {
    async fn create(&self, thread: &MessageThread) -> Result<MessageThread, DomainError>;

    /// Append one entry to an open thread, atomically with the status check.
    ///
    /// # Errors
    ///
    /// - `ThreadNotFound` if the id is unknown
    /// - `ThreadClosed` if the thread is no longer open when the write lands
    async fn append_entry(
        &self,
        id: &ThreadId,
        entry: &ThreadEntry,
    ) -> Result<MessageThread, DomainError>;

    /// Move an open thread to closed. Entries are left untouched.
    ///
    /// # Errors
    ///
    /// - `ThreadNotFound` if the id is unknown
    /// - `ThreadClosed` if it was already closed
    async fn close(&self, id: &ThreadId, closed_at: Timestamp)
        -> Result<MessageThread, DomainError>;

    async fn find_by_id(&self, id: &ThreadId) -> Result<Option<MessageThread>, DomainError>;

    /// Threads where `email` is the entrepreneur or the mentor, most recently
    /// updated first.
    async fn list_for(&self, email: &EmailAddress) -> Result<Vec<MessageThread>, DomainError>;
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a new note.
    async fn create(&self, note: &MentorNote) -> Result<MentorNote, DomainError>;

    /// Append one response. Leaves `completed` and earlier responses alone.
    ///
    /// # Errors
    ///
    /// - `NoteNotFound` if the note is not on this assignment
    async fn add_response(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        response: &NoteResponse,
    ) -> Result<MentorNote, DomainError>;

    /// Set only the completion flag.
    ///
    /// # Errors
    ///
    /// - `NoteNotFound` if the note is not on this assignment
    async fn set_completed(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        completed: bool,
    ) -> Result<MentorNote, DomainError>;

    async fn find(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
    ) -> Result<Option<MentorNote>, DomainError>;

    /// All notes of an assignment, oldest first.
    async fn list_for_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<MentorNote>, DomainError>;
}
