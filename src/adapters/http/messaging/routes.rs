//! Axum router configuration for messaging and note endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;
use crate::domain::messaging::MAX_ATTACHMENT_BYTES;

use super::handlers::{
    add_note, append_thread_entry, close_thread, list_messages, list_notes, list_threads,
    mark_messages_read, mark_threads_read, respond_to_note, send_message, set_note_completion,
    start_thread, unread_count,
};

/// Message routes, mounted at `/messages`.
pub fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_messages).post(send_message))
        .route("/read", post(mark_messages_read))
}

/// Thread routes, mounted at `/threads`.
pub fn thread_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_threads).post(start_thread))
        .route("/read", post(mark_threads_read))
        .route("/:id/entries", post(append_thread_entry))
        .route("/:id/close", post(close_thread))
}

/// Request body ceiling for note responses: a base64-encoded attachment at
/// the size limit plus room for the JSON envelope and text.
pub const NOTE_RESPONSE_BODY_LIMIT: usize =
    (MAX_ATTACHMENT_BYTES as usize + 2) / 3 * 4 + 64 * 1024;

/// Note routes, mounted at `/assignments`.
pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/notes", get(list_notes).post(add_note))
        .route(
            "/:id/notes/:note_id/responses",
            post(respond_to_note).layer(DefaultBodyLimit::max(NOTE_RESPONSE_BODY_LIMIT)),
        )
        .route("/:id/notes/:note_id/completion", post(set_note_completion))
}

/// `GET /unread`, mounted at the API root.
pub fn unread_routes() -> Router<AppState> {
    Router::new().route("/unread", get(unread_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_body_limit_fits_a_full_size_attachment() {
        let encoded = (MAX_ATTACHMENT_BYTES as usize).div_ceil(3) * 4;
        assert!(NOTE_RESPONSE_BODY_LIMIT > encoded);
        assert!(NOTE_RESPONSE_BODY_LIMIT < 15 * 1024 * 1024);
    }
}
