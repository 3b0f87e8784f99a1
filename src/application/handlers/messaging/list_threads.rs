//! ListThreadsHandler - A viewer's threads with unread markers.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::messaging::{thread_is_unread, MessageThread, MessagingError, ViewerKey};
use crate::ports::{ReadStateStore, ThreadRepository};

#[derive(Debug, Clone)]
pub struct ListThreadsQuery {
    pub viewer: ViewerKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadSummary {
    #[serde(flatten)]
    pub thread: MessageThread,
    pub unread: bool,
}

pub struct ListThreadsHandler {
    threads: Arc<dyn ThreadRepository>,
    read_state: Arc<dyn ReadStateStore>,
}

impl ListThreadsHandler {
    pub fn new(threads: Arc<dyn ThreadRepository>, read_state: Arc<dyn ReadStateStore>) -> Self {
        Self {
            threads,
            read_state,
        }
    }

    /// Most recently active first.
    pub async fn handle(&self, query: ListThreadsQuery) -> Result<Vec<ThreadSummary>, MessagingError> {
        let viewer = &query.viewer;
        let (mut threads, state) = futures::try_join!(
            async { self.threads.list_for(&viewer.email).await.map_err(MessagingError::from) },
            async { self.read_state.load(viewer).await.map_err(MessagingError::from) },
        )?;
        threads.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(threads
            .into_iter()
            .map(|thread| ThreadSummary {
                unread: thread_is_unread(&thread, viewer, &state),
                thread,
            })
            .collect())
    }
}
