//! Messaging HTTP adapter: messages, threads, read state and mentor notes.

mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use routes::{message_routes, note_routes, thread_routes, unread_routes};
