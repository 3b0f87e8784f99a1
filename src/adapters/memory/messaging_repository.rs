//! In-memory message, thread and note repositories.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    AssignmentId, DomainError, EmailAddress, ErrorCode, NoteId, ThreadId, Timestamp,
};
use crate::domain::messaging::{Message, MessageThread, MentorNote, NoteResponse, ThreadEntry};
use crate::ports::{MessageRepository, NoteRepository, ThreadRepository};

// ════════════════════════════════════════════════════════════════════════════
// Messages
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, message: &Message) -> Result<Message, DomainError> {
        self.messages.write().await.push(message.clone());
        Ok(message.clone())
    }

    async fn list_for(&self, email: &EmailAddress) -> Result<Vec<Message>, DomainError> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.involves(email))
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Threads
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct InMemoryThreadRepository {
    threads: RwLock<HashMap<ThreadId, MessageThread>>,
}

impl InMemoryThreadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThreadRepository for InMemoryThreadRepository {
    async fn create(&self, thread: &MessageThread) -> Result<MessageThread, DomainError> {
        self.threads.write().await.insert(thread.id, thread.clone());
        Ok(thread.clone())
    }

    async fn append_entry(
        &self,
        id: &ThreadId,
        entry: &ThreadEntry,
    ) -> Result<MessageThread, DomainError> {
        let mut threads = self.threads.write().await;
        let thread = threads.get_mut(id).ok_or_else(|| thread_not_found(id))?;
        // Status is re-read under the write lock.
        thread.push_entry(entry.clone())?;
        Ok(thread.clone())
    }

    async fn close(
        &self,
        id: &ThreadId,
        closed_at: Timestamp,
    ) -> Result<MessageThread, DomainError> {
        let mut threads = self.threads.write().await;
        let thread = threads.get_mut(id).ok_or_else(|| thread_not_found(id))?;
        thread.mark_closed(closed_at)?;
        Ok(thread.clone())
    }

    async fn find_by_id(&self, id: &ThreadId) -> Result<Option<MessageThread>, DomainError> {
        Ok(self.threads.read().await.get(id).cloned())
    }

    async fn list_for(&self, email: &EmailAddress) -> Result<Vec<MessageThread>, DomainError> {
        let mut list: Vec<_> = self
            .threads
            .read()
            .await
            .values()
            .filter(|t| t.involves(email))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(list)
    }
}

fn thread_not_found(id: &ThreadId) -> DomainError {
    DomainError::new(ErrorCode::ThreadNotFound, format!("Thread not found: {}", id))
}

// ════════════════════════════════════════════════════════════════════════════
// Notes
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: RwLock<HashMap<NoteId, MentorNote>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn create(&self, note: &MentorNote) -> Result<MentorNote, DomainError> {
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note.clone())
    }

    async fn add_response(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        response: &NoteResponse,
    ) -> Result<MentorNote, DomainError> {
        let mut notes = self.notes.write().await;
        let note = note_on(&mut notes, assignment_id, note_id)?;
        note.add_response(response.clone());
        Ok(note.clone())
    }

    async fn set_completed(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        completed: bool,
    ) -> Result<MentorNote, DomainError> {
        let mut notes = self.notes.write().await;
        let note = note_on(&mut notes, assignment_id, note_id)?;
        note.set_completed(completed);
        Ok(note.clone())
    }

    async fn find(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
    ) -> Result<Option<MentorNote>, DomainError> {
        Ok(self
            .notes
            .read()
            .await
            .get(note_id)
            .filter(|n| &n.assignment_id == assignment_id)
            .cloned())
    }

    async fn list_for_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<MentorNote>, DomainError> {
        let mut list: Vec<_> = self
            .notes
            .read()
            .await
            .values()
            .filter(|n| &n.assignment_id == assignment_id)
            .cloned()
            .collect();
        list.sort_by_key(|n| n.timestamp);
        Ok(list)
    }
}

fn note_on<'a>(
    notes: &'a mut HashMap<NoteId, MentorNote>,
    assignment_id: &AssignmentId,
    note_id: &NoteId,
) -> Result<&'a mut MentorNote, DomainError> {
    notes
        .get_mut(note_id)
        .filter(|n| &n.assignment_id == assignment_id)
        .ok_or_else(|| {
            DomainError::new(ErrorCode::NoteNotFound, format!("Note not found: {}", note_id))
        })
}
