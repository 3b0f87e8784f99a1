//! Messaging domain module.
//!
//! One-shot messages, entrepreneur/mentor threads, mentor notes with
//! responses, and per-viewer read state.
//!
//! # Module Structure
//!
//! - `message` - One-shot messages
//! - `thread` - Threads and the open/closed state machine
//! - `note` - Mentor notes and response validation
//! - `attachment` - Attachment allow-list and size limit
//! - `read_state` - Watermarks and the unread algorithm

mod attachment;
mod errors;
mod message;
mod note;
mod read_state;
mod thread;

pub use attachment::{
    validate_attachment, AttachmentRef, AttachmentUpload, ALLOWED_MIME_TYPES,
    MAX_ATTACHMENT_BYTES,
};
pub use errors::MessagingError;
pub use message::{Message, Participant};
pub use note::{MentorNote, NoteResponse, ResponseDraft};
pub use read_state::{
    count_unread, legacy_unread, thread_is_unread, ReadState, UnreadCount, ViewerKey,
};
pub use thread::{EntryDraft, MessageThread, ThreadEntry, ThreadParty, ThreadStatus};
