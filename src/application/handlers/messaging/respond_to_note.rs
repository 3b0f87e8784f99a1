//! RespondToNoteHandler - Entrepreneur replies to a mentor note.

use std::sync::Arc;

use crate::domain::foundation::{AssignmentId, AuthenticatedUser, NoteId};
use crate::domain::messaging::{MentorNote, MessagingError, NoteResponse, ResponseDraft};
use crate::ports::{ApplicantRepository, AssignmentRepository, AttachmentStorage, NoteRepository};

use super::access::{resolve_party, AssignmentParty};
use super::notes::sorted_notes;

#[derive(Debug, Clone)]
pub struct RespondToNoteCommand {
    pub actor: AuthenticatedUser,
    pub assignment_id: AssignmentId,
    pub note_id: NoteId,
    pub response: ResponseDraft,
}

/// Adds a response and returns the assignment's full notes collection,
/// which callers use to replace their cached copy wholesale.
///
/// Validation (text or attachment, allow-listed MIME, size) happens before
/// any upload or lookup. Responding never changes `completed`, and the
/// response is appended in place rather than written back with the note.
pub struct RespondToNoteHandler {
    applicants: Arc<dyn ApplicantRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    notes: Arc<dyn NoteRepository>,
    storage: Arc<dyn AttachmentStorage>,
}

impl RespondToNoteHandler {
    pub fn new(
        applicants: Arc<dyn ApplicantRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        notes: Arc<dyn NoteRepository>,
        storage: Arc<dyn AttachmentStorage>,
    ) -> Self {
        Self {
            applicants,
            assignments,
            notes,
            storage,
        }
    }

    pub async fn handle(&self, cmd: RespondToNoteCommand) -> Result<Vec<MentorNote>, MessagingError> {
        // 1. Local validation
        let text = cmd.response.validate()?;

        // 2. Authorization
        let (assignment, party) = resolve_party(
            self.applicants.as_ref(),
            self.assignments.as_ref(),
            &cmd.assignment_id,
            &cmd.actor,
        )
        .await?;
        if party != AssignmentParty::Entrepreneur {
            return Err(MessagingError::permission(
                "only the assigned entrepreneur may respond to notes",
            ));
        }

        // Existence check only; nothing read here is written back.
        self.notes
            .find(&assignment.id, &cmd.note_id)
            .await?
            .ok_or(MessagingError::NoteNotFound(cmd.note_id))?;

        // 3. Upload, then record the response
        let attachment = match &cmd.response.attachment {
            Some(upload) => Some(
                self.storage
                    .store(&assignment.id.to_string(), upload)
                    .await
                    .map_err(|e| {
                        tracing::error!(note_id = %cmd.note_id, error = %e, "Attachment upload failed");
                        MessagingError::from(e)
                    })?,
            ),
            None => None,
        };
        let response = NoteResponse::new(text, attachment);
        self.notes
            .add_response(&assignment.id, &cmd.note_id, &response)
            .await
            .map_err(|e| MessagingError::for_note(cmd.note_id, e))?;

        // 4. Authoritative collection
        let notes = self.notes.list_for_assignment(&assignment.id).await?;
        Ok(sorted_notes(notes))
    }
}
