//! ListMessagesHandler - A viewer's one-shot messages with read flags.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::messaging::{Message, MessagingError, ViewerKey};
use crate::ports::{MessageRepository, ReadStateStore};

#[derive(Debug, Clone)]
pub struct ListMessagesQuery {
    pub viewer: ViewerKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct InboxItem {
    #[serde(flatten)]
    pub message: Message,
    /// Sent messages always count as read.
    pub is_read: bool,
}

#[derive(Debug, Clone)]
pub struct ListMessagesResult {
    /// Newest first.
    pub items: Vec<InboxItem>,
}

pub struct ListMessagesHandler {
    messages: Arc<dyn MessageRepository>,
    read_state: Arc<dyn ReadStateStore>,
}

impl ListMessagesHandler {
    pub fn new(messages: Arc<dyn MessageRepository>, read_state: Arc<dyn ReadStateStore>) -> Self {
        Self {
            messages,
            read_state,
        }
    }

    pub async fn handle(&self, query: ListMessagesQuery) -> Result<ListMessagesResult, MessagingError> {
        let viewer = &query.viewer;
        let (mut messages, state) = futures::try_join!(
            async { self.messages.list_for(&viewer.email).await.map_err(MessagingError::from) },
            async { self.read_state.load(viewer).await.map_err(MessagingError::from) },
        )?;
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let items = messages
            .into_iter()
            .map(|message| {
                let is_read = !message.is_addressed_to(&viewer.email) || state.is_read(&message.id);
                InboxItem { message, is_read }
            })
            .collect();
        Ok(ListMessagesResult { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ActorRole;

    #[tokio::test]
    async fn received_messages_start_unread_and_sent_ones_read() {
        let handler = ListMessagesHandler::new(
            Arc::new(MockMessageRepository::with(vec![
                message("admin@example.com", "e1@example.com", "hello"),
                message("e1@example.com", "admin@example.com", "thanks"),
            ])),
            Arc::new(MockReadStateStore::default()),
        );

        let result = handler
            .handle(ListMessagesQuery {
                viewer: ViewerKey::new(ActorRole::Entrepreneur, email("e1@example.com")),
            })
            .await
            .unwrap();

        assert_eq!(result.items.len(), 2);
        let unread: Vec<&str> = result
            .items
            .iter()
            .filter(|i| !i.is_read)
            .map(|i| i.message.message.as_str())
            .collect();
        assert_eq!(unread, vec!["hello"]);
    }
}
