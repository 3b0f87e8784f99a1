//! Mentor note handlers: add, complete, list.
//!
//! Only the assigned mentor may add notes or toggle completion. Either
//! party (or an admin) may list them.

use std::sync::Arc;

use crate::domain::foundation::{AssignmentId, AuthenticatedUser, NoteId};
use crate::domain::messaging::{MentorNote, MessagingError};
use crate::ports::{ApplicantRepository, AssignmentRepository, NoteRepository};

use super::access::{resolve_party, AssignmentParty};

fn newest_first(mut notes: Vec<MentorNote>) -> Vec<MentorNote> {
    notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    notes
}

// ════════════════════════════════════════════════════════════════════════════
// Add
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct AddNoteCommand {
    pub actor: AuthenticatedUser,
    pub assignment_id: AssignmentId,
    pub text: String,
}

pub struct AddNoteHandler {
    applicants: Arc<dyn ApplicantRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    notes: Arc<dyn NoteRepository>,
}

impl AddNoteHandler {
    pub fn new(
        applicants: Arc<dyn ApplicantRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        notes: Arc<dyn NoteRepository>,
    ) -> Self {
        Self {
            applicants,
            assignments,
            notes,
        }
    }

    pub async fn handle(&self, cmd: AddNoteCommand) -> Result<MentorNote, MessagingError> {
        let intended = MentorNote::new(cmd.assignment_id, cmd.text)?;

        let (_, party) = resolve_party(
            self.applicants.as_ref(),
            self.assignments.as_ref(),
            &cmd.assignment_id,
            &cmd.actor,
        )
        .await?;
        if party != AssignmentParty::Mentor {
            return Err(MessagingError::permission(
                "only the assigned mentor may add notes",
            ));
        }

        let note = self.notes.create(&intended).await?;
        tracing::info!(assignment_id = %cmd.assignment_id, note_id = %note.id, "Mentor note added");
        Ok(note)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Completion
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct SetNoteCompletionCommand {
    pub actor: AuthenticatedUser,
    pub assignment_id: AssignmentId,
    pub note_id: NoteId,
    pub completed: bool,
}

pub struct SetNoteCompletionHandler {
    applicants: Arc<dyn ApplicantRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    notes: Arc<dyn NoteRepository>,
}

impl SetNoteCompletionHandler {
    pub fn new(
        applicants: Arc<dyn ApplicantRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        notes: Arc<dyn NoteRepository>,
    ) -> Self {
        Self {
            applicants,
            assignments,
            notes,
        }
    }

    pub async fn handle(&self, cmd: SetNoteCompletionCommand) -> Result<MentorNote, MessagingError> {
        let (_, party) = resolve_party(
            self.applicants.as_ref(),
            self.assignments.as_ref(),
            &cmd.assignment_id,
            &cmd.actor,
        )
        .await?;
        if party != AssignmentParty::Mentor {
            return Err(MessagingError::permission(
                "only the assigned mentor may complete notes",
            ));
        }

        // Writes only the flag, so responses landing meanwhile are kept.
        let note = self
            .notes
            .set_completed(&cmd.assignment_id, &cmd.note_id, cmd.completed)
            .await
            .map_err(|e| MessagingError::for_note(cmd.note_id, e))?;
        tracing::debug!(note_id = %note.id, completed = note.completed, "Note completion set");
        Ok(note)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// List
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ListNotesQuery {
    pub actor: AuthenticatedUser,
    pub assignment_id: AssignmentId,
}

pub struct ListNotesHandler {
    applicants: Arc<dyn ApplicantRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    notes: Arc<dyn NoteRepository>,
}

impl ListNotesHandler {
    pub fn new(
        applicants: Arc<dyn ApplicantRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        notes: Arc<dyn NoteRepository>,
    ) -> Self {
        Self {
            applicants,
            assignments,
            notes,
        }
    }

    /// Newest first.
    pub async fn handle(&self, query: ListNotesQuery) -> Result<Vec<MentorNote>, MessagingError> {
        resolve_party(
            self.applicants.as_ref(),
            self.assignments.as_ref(),
            &query.assignment_id,
            &query.actor,
        )
        .await?;
        let notes = self.notes.list_for_assignment(&query.assignment_id).await?;
        Ok(newest_first(notes))
    }
}

pub(super) fn sorted_notes(notes: Vec<MentorNote>) -> Vec<MentorNote> {
    newest_first(notes)
}
