//! Entrepreneur/mentor conversation threads.
//!
//! A thread is `open` until its mentor closes it. Closed is terminal and
//! accepts no further entries.

use crate::domain::foundation::{
    ActorRole, EmailAddress, StateMachine, ThreadId, Timestamp,
};
use serde::{Deserialize, Serialize};

use super::{AttachmentRef, MessagingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    Open,
    Closed,
}

impl StateMachine for ThreadStatus {
    fn successors(&self) -> &'static [Self] {
        match self {
            ThreadStatus::Open => &[ThreadStatus::Closed],
            ThreadStatus::Closed => &[],
        }
    }
}

/// Which side of the thread wrote an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadParty {
    Entrepreneur,
    Mentor,
}

impl ThreadParty {
    pub fn as_actor_role(&self) -> ActorRole {
        match self {
            ThreadParty::Entrepreneur => ActorRole::Entrepreneur,
            ThreadParty::Mentor => ActorRole::Mentor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEntry {
    pub sender_role: ThreadParty,
    pub sender_name: String,
    pub message: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    pub created_at: Timestamp,
}

/// Content of a new entry, before it is attributed to a party.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub sender_name: String,
    pub message: String,
    pub attachments: Vec<AttachmentRef>,
}

impl EntryDraft {
    pub fn new(sender_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sender_name: sender_name.into(),
            message: message.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Vec<AttachmentRef>) -> Self {
        self.attachments = attachments;
        self
    }

    fn into_entry(self, sender_role: ThreadParty) -> Result<ThreadEntry, MessagingError> {
        if self.message.trim().is_empty() && self.attachments.is_empty() {
            return Err(MessagingError::validation(
                "message",
                "entry needs text or an attachment",
            ));
        }
        Ok(ThreadEntry {
            sender_role,
            sender_name: self.sender_name,
            message: self.message,
            attachments: self.attachments,
            created_at: Timestamp::now(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageThread {
    pub id: ThreadId,
    pub entrepreneur_email: EmailAddress,
    pub mentor_email: EmailAddress,
    pub subject: String,
    pub status: ThreadStatus,
    pub entries: Vec<ThreadEntry>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MessageThread {
    /// Opens a thread with its first entry written by `author`.
    pub fn start(
        entrepreneur_email: EmailAddress,
        mentor_email: EmailAddress,
        subject: impl Into<String>,
        author: &EmailAddress,
        first_entry: EntryDraft,
    ) -> Result<Self, MessagingError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(MessagingError::validation("subject", "subject cannot be empty"));
        }

        let now = Timestamp::now();
        let mut thread = Self {
            id: ThreadId::new(),
            entrepreneur_email,
            mentor_email,
            subject: subject.trim().to_string(),
            status: ThreadStatus::Open,
            entries: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        thread.append(author, first_entry)?;
        Ok(thread)
    }

    /// Which party `email` is on, if any.
    pub fn party_of(&self, email: &EmailAddress) -> Option<ThreadParty> {
        if email == &self.mentor_email {
            Some(ThreadParty::Mentor)
        } else if email == &self.entrepreneur_email {
            Some(ThreadParty::Entrepreneur)
        } else {
            None
        }
    }

    pub fn involves(&self, email: &EmailAddress) -> bool {
        self.party_of(email).is_some()
    }

    pub fn is_open(&self) -> bool {
        self.status == ThreadStatus::Open
    }

    pub fn last_entry(&self) -> Option<&ThreadEntry> {
        self.entries.last()
    }

    /// Builds the entry `author` would add, without changing the thread.
    ///
    /// Permission is checked first, then the open state, then content.
    /// Repositories re-check the open state when the entry is stored.
    pub fn prepare_entry(
        &self,
        author: &EmailAddress,
        draft: EntryDraft,
    ) -> Result<ThreadEntry, MessagingError> {
        let party = self.party_of(author).ok_or_else(|| {
            MessagingError::permission(format!("{} is not part of this thread", author))
        })?;
        if !self.is_open() {
            return Err(MessagingError::ThreadClosed(self.id));
        }
        draft.into_entry(party)
    }

    pub fn append(
        &mut self,
        author: &EmailAddress,
        draft: EntryDraft,
    ) -> Result<&ThreadEntry, MessagingError> {
        let entry = self.prepare_entry(author, draft)?;
        self.push_entry(entry)?;
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Stores an already prepared entry; refused once closed.
    pub fn push_entry(&mut self, entry: ThreadEntry) -> Result<(), MessagingError> {
        if !self.is_open() {
            return Err(MessagingError::ThreadClosed(self.id));
        }
        self.updated_at = entry.created_at;
        self.entries.push(entry);
        Ok(())
    }

    /// Only the thread's mentor may close, and only an open thread.
    pub fn check_close(&self, actor: &EmailAddress) -> Result<(), MessagingError> {
        if self.party_of(actor) != Some(ThreadParty::Mentor) {
            return Err(MessagingError::permission(
                "only the thread's mentor may close it",
            ));
        }
        self.status
            .transition_to(ThreadStatus::Closed)
            .map(|_| ())
            .map_err(|_| MessagingError::ThreadClosed(self.id))
    }

    pub fn close(&mut self, actor: &EmailAddress) -> Result<(), MessagingError> {
        self.check_close(actor)?;
        self.mark_closed(Timestamp::now())
    }

    /// Status change only; callers have already authorized it.
    pub fn mark_closed(&mut self, at: Timestamp) -> Result<(), MessagingError> {
        self.status = self
            .status
            .transition_to(ThreadStatus::Closed)
            .map_err(|_| MessagingError::ThreadClosed(self.id))?;
        self.updated_at = at;
        Ok(())
    }
}
