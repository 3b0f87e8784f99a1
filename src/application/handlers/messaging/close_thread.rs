//! CloseThreadHandler - The mentor ends a conversation.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ThreadId, Timestamp};
use crate::domain::messaging::{MessageThread, MessagingError};
use crate::ports::ThreadRepository;

#[derive(Debug, Clone)]
pub struct CloseThreadCommand {
    pub actor: AuthenticatedUser,
    pub thread_id: ThreadId,
}

pub struct CloseThreadHandler {
    threads: Arc<dyn ThreadRepository>,
}

impl CloseThreadHandler {
    pub fn new(threads: Arc<dyn ThreadRepository>) -> Self {
        Self { threads }
    }

    pub async fn handle(&self, cmd: CloseThreadCommand) -> Result<MessageThread, MessagingError> {
        let current = self
            .threads
            .find_by_id(&cmd.thread_id)
            .await?
            .ok_or(MessagingError::ThreadNotFound(cmd.thread_id))?;

        current.check_close(&cmd.actor.email)?;

        let thread = self
            .threads
            .close(&cmd.thread_id, Timestamp::now())
            .await
            .map_err(|e| MessagingError::for_thread(cmd.thread_id, e))?;
        tracing::info!(thread_id = %thread.id, "Thread closed");
        Ok(thread)
    }
}
