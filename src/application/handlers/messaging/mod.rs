//! Messaging handlers.
//!
//! ## Commands
//! - One-shot messages and admin broadcasts
//! - Thread start, reply and close
//! - Mentor notes, completion and entrepreneur responses
//! - Marking items read
//!
//! ## Queries
//! - Messages, threads and notes for a viewer
//! - Unread badge

mod access;
mod append_thread_entry;
mod close_thread;
mod list_messages;
mod list_threads;
mod mark_read;
mod notes;
mod respond_to_note;
mod send_message;
mod start_thread;
mod unread_count;

// Commands
pub use append_thread_entry::{AppendThreadEntryCommand, AppendThreadEntryHandler};
pub use close_thread::{CloseThreadCommand, CloseThreadHandler};
pub use mark_read::{MarkReadCommand, MarkReadHandler, MarkReadResult, ReadTarget};
pub use notes::{
    AddNoteCommand, AddNoteHandler, ListNotesHandler, ListNotesQuery, SetNoteCompletionCommand,
    SetNoteCompletionHandler,
};
pub use respond_to_note::{RespondToNoteCommand, RespondToNoteHandler};
pub use send_message::{
    FailedDelivery, SendMessageCommand, SendMessageHandler, SendMessageResult,
};
pub use start_thread::{StartThreadCommand, StartThreadHandler};

// Queries
pub use list_messages::{InboxItem, ListMessagesHandler, ListMessagesQuery, ListMessagesResult};
pub use list_threads::{ListThreadsHandler, ListThreadsQuery, ThreadSummary};
pub use unread_count::{UnreadCountHandler, UnreadCountQuery};
