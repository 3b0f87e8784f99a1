//! MarkReadHandler - Opening a view marks its items read.

use std::sync::Arc;

use crate::domain::foundation::{MessageId, ThreadId};
use crate::domain::messaging::{count_unread, MessagingError, UnreadCount, ViewerKey};
use crate::ports::{MessageRepository, ReadStateStore, ThreadRepository};

/// What the viewer opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadTarget {
    /// Every message addressed to the viewer.
    Inbox,
    Messages(Vec<MessageId>),
    /// Specific threads, or all of the viewer's threads when empty.
    Threads(Vec<ThreadId>),
}

#[derive(Debug, Clone)]
pub struct MarkReadCommand {
    pub viewer: ViewerKey,
    pub target: ReadTarget,
}

#[derive(Debug, Clone)]
pub struct MarkReadResult {
    /// Messages newly added to the read set.
    pub newly_read: usize,
    /// Badge recomputed from the persisted state.
    pub unread: UnreadCount,
}

/// Marks items read and persists the watermark before recomputing the
/// badge, so the new count survives a reload.
pub struct MarkReadHandler {
    messages: Arc<dyn MessageRepository>,
    threads: Arc<dyn ThreadRepository>,
    read_state: Arc<dyn ReadStateStore>,
}

impl MarkReadHandler {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        threads: Arc<dyn ThreadRepository>,
        read_state: Arc<dyn ReadStateStore>,
    ) -> Self {
        Self {
            messages,
            threads,
            read_state,
        }
    }

    pub async fn handle(&self, cmd: MarkReadCommand) -> Result<MarkReadResult, MessagingError> {
        let viewer = &cmd.viewer;
        let (messages, threads, mut state) = futures::try_join!(
            async { self.messages.list_for(&viewer.email).await.map_err(MessagingError::from) },
            async { self.threads.list_for(&viewer.email).await.map_err(MessagingError::from) },
            async { self.read_state.load(viewer).await.map_err(MessagingError::from) },
        )?;

        let newly_read = match &cmd.target {
            ReadTarget::Inbox => state.mark_inbox_read(&messages, viewer),
            ReadTarget::Messages(ids) => state.mark_messages_read(
                messages
                    .iter()
                    .filter(|m| m.is_addressed_to(&viewer.email) && ids.contains(&m.id))
                    .map(|m| m.id),
            ),
            ReadTarget::Threads(ids) => {
                threads
                    .iter()
                    .filter(|t| ids.is_empty() || ids.contains(&t.id))
                    .for_each(|t| state.mark_thread_seen(t));
                0
            }
        };

        // Persist before any further read-state computation.
        self.read_state.save(viewer, &state).await.map_err(|e| {
            tracing::error!(viewer = %viewer, error = %e, "Failed to persist read state");
            MessagingError::from(e)
        })?;

        let unread = count_unread(&messages, &threads, viewer, &state);
        Ok(MarkReadResult { newly_read, unread })
    }
}
