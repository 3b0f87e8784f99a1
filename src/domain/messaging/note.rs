//! Mentor notes and entrepreneur responses.

use crate::domain::foundation::{AssignmentId, NoteId, Timestamp};
use serde::{Deserialize, Serialize};

use super::{AttachmentRef, AttachmentUpload, MessagingError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub attachment_name: Option<String>,
    pub timestamp: Timestamp,
}

impl NoteResponse {
    pub fn new(text: Option<String>, attachment: Option<AttachmentRef>) -> Self {
        let (attachment_url, attachment_name) = match attachment {
            Some(a) => (Some(a.url), Some(a.name)),
            None => (None, None),
        };
        Self {
            text,
            attachment_url,
            attachment_name,
            timestamp: Timestamp::now(),
        }
    }
}

/// A note a mentor leaves for their assigned entrepreneur.
///
/// `completed` is mentor-controlled; responses never change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorNote {
    pub id: NoteId,
    pub assignment_id: AssignmentId,
    pub text: String,
    pub timestamp: Timestamp,
    pub completed: bool,
    #[serde(default)]
    pub responses: Vec<NoteResponse>,
}

impl MentorNote {
    pub fn new(assignment_id: AssignmentId, text: impl Into<String>) -> Result<Self, MessagingError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MessagingError::validation("text", "note cannot be empty"));
        }
        Ok(Self {
            id: NoteId::new(),
            assignment_id,
            text,
            timestamp: Timestamp::now(),
            completed: false,
            responses: Vec::new(),
        })
    }

    pub fn add_response(&mut self, response: NoteResponse) {
        self.responses.push(response);
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

/// An entrepreneur's response before any upload happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseDraft {
    pub text: Option<String>,
    pub attachment: Option<AttachmentUpload>,
}

impl ResponseDraft {
    /// Validates locally: needs text or an attachment, and the attachment
    /// must pass the allow-list and size limit.
    ///
    /// Returns the trimmed text, if any.
    pub fn validate(&self) -> Result<Option<String>, MessagingError> {
        let text = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        if text.is_none() && self.attachment.is_none() {
            return Err(MessagingError::EmptyResponse);
        }
        if let Some(upload) = &self.attachment {
            upload.validate()?;
        }
        Ok(text)
    }
}
