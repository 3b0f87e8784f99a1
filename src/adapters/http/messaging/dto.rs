//! Request and response bodies for messaging and note endpoints.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::application::handlers::{FailedDelivery, InboxItem, ThreadSummary};
use crate::domain::foundation::{EmailAddress, MessageId, ThreadId};
use crate::domain::messaging::{
    AttachmentRef, AttachmentUpload, MentorNote, Message, MessageThread, MessagingError,
    Participant, ResponseDraft, UnreadCount,
};

// ════════════════════════════════════════════════════════════════════════════════
// Messages
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub recipients: Vec<Participant>,
    pub text: String,
}

/// `failed` lists recipients that did not get the message; resend to
/// exactly those.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedRecipient>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedRecipient {
    pub recipient: Participant,
    pub code: String,
    pub message: String,
}

impl From<FailedDelivery> for FailedRecipient {
    fn from(failure: FailedDelivery) -> Self {
        Self {
            recipient: failure.recipient,
            code: failure.error.code().to_string(),
            message: failure.error.message(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InboxResponse {
    pub items: Vec<InboxItem>,
}

/// Omitting `message_ids` marks the whole inbox read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkMessagesReadRequest {
    #[serde(default)]
    pub message_ids: Option<Vec<MessageId>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkThreadsReadRequest {
    pub thread_ids: Vec<ThreadId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    pub newly_read: usize,
    pub unread: UnreadCount,
}

// ════════════════════════════════════════════════════════════════════════════════
// Threads
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct StartThreadRequest {
    pub entrepreneur_email: EmailAddress,
    pub mentor_email: EmailAddress,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppendEntryRequest {
    pub message: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadResponse {
    pub thread: MessageThread,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadListResponse {
    pub threads: Vec<ThreadSummary>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Notes
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct AddNoteRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteCompletionRequest {
    pub completed: bool,
}

/// Inline attachment; the file travels base64-encoded inside the JSON body.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentPayload {
    pub file_name: String,
    pub mime_type: String,
    pub data_base64: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteResponseRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attachment: Option<AttachmentPayload>,
}

impl NoteResponseRequest {
    /// Decodes the attachment. Size and type checks happen in the handler.
    pub fn into_draft(self) -> Result<ResponseDraft, MessagingError> {
        let attachment = match self.attachment {
            Some(payload) => {
                let bytes = STANDARD
                    .decode(payload.data_base64.trim())
                    .map_err(|e| MessagingError::invalid_attachment(format!("bad base64: {}", e)))?;
                Some(AttachmentUpload {
                    file_name: payload.file_name,
                    mime_type: payload.mime_type,
                    bytes,
                })
            }
            None => None,
        };
        Ok(ResponseDraft {
            text: self.text,
            attachment,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteResponse {
    pub note: MentorNote,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteListResponse {
    pub notes: Vec<MentorNote>,
}
