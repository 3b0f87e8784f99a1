//! AppendThreadEntryHandler - Reply within an open thread.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ThreadId};
use crate::domain::messaging::{AttachmentRef, EntryDraft, MessageThread, MessagingError};
use crate::ports::ThreadRepository;

#[derive(Debug, Clone)]
pub struct AppendThreadEntryCommand {
    pub actor: AuthenticatedUser,
    pub thread_id: ThreadId,
    pub message: String,
    pub attachments: Vec<AttachmentRef>,
}

pub struct AppendThreadEntryHandler {
    threads: Arc<dyn ThreadRepository>,
}

impl AppendThreadEntryHandler {
    pub fn new(threads: Arc<dyn ThreadRepository>) -> Self {
        Self { threads }
    }

    /// Returns the thread as persisted, including the new entry.
    pub async fn handle(
        &self,
        cmd: AppendThreadEntryCommand,
    ) -> Result<MessageThread, MessagingError> {
        let current = self
            .threads
            .find_by_id(&cmd.thread_id)
            .await?
            .ok_or(MessagingError::ThreadNotFound(cmd.thread_id))?;

        let draft = EntryDraft::new(cmd.actor.display_name_or_email(), cmd.message)
            .with_attachments(cmd.attachments);
        let entry = current.prepare_entry(&cmd.actor.email, draft)?;

        // The repository re-checks the open state, so a close that lands
        // after the read above still wins.
        let thread = self
            .threads
            .append_entry(&cmd.thread_id, &entry)
            .await
            .map_err(|e| MessagingError::for_thread(cmd.thread_id, e))?;
        tracing::debug!(thread_id = %thread.id, entries = thread.entries.len(), "Thread entry appended");
        Ok(thread)
    }
}
