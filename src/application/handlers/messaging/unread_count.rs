//! UnreadCountHandler - Legacy plus threaded unread badge for one viewer.

use std::sync::Arc;

use crate::domain::messaging::{count_unread, MessagingError, UnreadCount, ViewerKey};
use crate::ports::{MessageRepository, ReadStateStore, ThreadRepository};

#[derive(Debug, Clone)]
pub struct UnreadCountQuery {
    pub viewer: ViewerKey,
}

/// Computes the unread badge from a fresh fetch. Pure over its inputs, so
/// repeating it without new data gives the same count.
pub struct UnreadCountHandler {
    messages: Arc<dyn MessageRepository>,
    threads: Arc<dyn ThreadRepository>,
    read_state: Arc<dyn ReadStateStore>,
}

impl UnreadCountHandler {
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

    pub async fn handle(&self, query: UnreadCountQuery) -> Result<UnreadCount, MessagingError> {
        let viewer = &query.viewer;
        let (messages, threads, state) = futures::try_join!(
            async { self.messages.list_for(&viewer.email).await.map_err(MessagingError::from) },
            async { self.threads.list_for(&viewer.email).await.map_err(MessagingError::from) },
            async { self.read_state.load(viewer).await.map_err(MessagingError::from) },
        )?;
        Ok(count_unread(&messages, &threads, viewer, &state))
    }
}
