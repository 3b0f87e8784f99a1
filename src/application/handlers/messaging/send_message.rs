//! SendMessageHandler - One-shot messages and admin broadcasts.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::messaging::{Message, MessagingError, Participant};
use crate::ports::MessageRepository;

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub sender: AuthenticatedUser,
    /// One recipient, or several for an admin broadcast.
    pub recipients: Vec<Participant>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SendMessageResult {
    /// One stored message per recipient that received it.
    pub messages: Vec<Message>,
    /// Recipients whose copy could not be stored. Retry with only these.
    pub failed: Vec<FailedDelivery>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDelivery {
    pub recipient: Participant,
    pub error: MessagingError,
}

/// Sends a one-shot message. Broadcasting to more than one recipient is
/// reserved for admins.
///
/// Every recipient is attempted even if an earlier save fails. The call
/// errors only when nothing was stored; otherwise the result lists who got
/// the message and who did not.
pub struct SendMessageHandler {
    messages: Arc<dyn MessageRepository>,
}

impl SendMessageHandler {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, MessagingError> {
        if cmd.recipients.is_empty() {
            return Err(MessagingError::validation("to", "at least one recipient is required"));
        }
        if cmd.recipients.len() > 1 && !cmd.sender.is_admin() {
            return Err(MessagingError::permission("only admins may broadcast"));
        }

        let from = Participant::new(
            cmd.sender.email.clone(),
            cmd.sender.display_name_or_email(),
        );
        // Compose all first so a validation failure sends nothing.
        let drafts = cmd
            .recipients
            .into_iter()
            .map(|to| Message::compose(from.clone(), to, cmd.text.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut messages = Vec::with_capacity(drafts.len());
        let mut failed = Vec::new();
        for draft in drafts {
            match self.messages.save(&draft).await {
                Ok(message) => messages.push(message),
                Err(err) => {
                    tracing::warn!(to = %draft.to_email, error = %err, "Message delivery failed");
                    failed.push(FailedDelivery {
                        recipient: Participant::new(draft.to_email, draft.to_name),
                        error: err.into(),
                    });
                }
            }
        }

        if messages.is_empty() {
            if let Some(first) = failed.first().cloned() {
                return Err(first.error);
            }
        }

        tracing::info!(
            from = %cmd.sender.email,
            count = messages.len(),
            failed = failed.len(),
            "Message sent"
        );
        Ok(SendMessageResult { messages, failed })
    }
}
