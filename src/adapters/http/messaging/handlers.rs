//! HTTP handlers for messages, threads, read state and mentor notes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    AddNoteCommand, AppendThreadEntryCommand, CloseThreadCommand, ListMessagesQuery,
    ListNotesQuery, ListThreadsQuery, MarkReadCommand, ReadTarget, RespondToNoteCommand,
    SendMessageCommand, SetNoteCompletionCommand, StartThreadCommand, UnreadCountQuery,
};
use crate::domain::foundation::{AssignmentId, NoteId, ThreadId};
use crate::domain::messaging::{MessagingError, ViewerKey, MAX_ATTACHMENT_BYTES};

use super::dto::{
    AddNoteRequest, AppendEntryRequest, InboxResponse, MarkMessagesReadRequest,
    MarkReadResponse, MarkThreadsReadRequest, NoteCompletionRequest, NoteListResponse,
    NoteResponse, NoteResponseRequest, SendMessageRequest, SendMessageResponse,
    StartThreadRequest, ThreadListResponse, ThreadResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Messages
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/messages - Inbox with per-message read flags
pub async fn list_messages(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .list_messages_handler()
        .handle(ListMessagesQuery {
            viewer: ViewerKey::from(&user),
        })
        .await?;

    Ok(Json(InboxResponse {
        items: result.items,
    }))
}

/// POST /api/messages - One message per recipient
pub async fn send_message(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .send_message_handler()
        .handle(SendMessageCommand {
            sender: user,
            recipients: request.recipients,
            text: request.text,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            messages: result.messages,
            failed: result.failed.into_iter().map(Into::into).collect(),
        }),
    ))
}

/// POST /api/messages/read - Mark listed messages, or the whole inbox, read
pub async fn mark_messages_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<MarkMessagesReadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let target = match request.message_ids {
        Some(ids) => ReadTarget::Messages(ids),
        None => ReadTarget::Inbox,
    };
    mark_read(&state, ViewerKey::from(&user), target).await
}

/// POST /api/threads/read - Advance thread watermarks to their current length
pub async fn mark_threads_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<MarkThreadsReadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    mark_read(
        &state,
        ViewerKey::from(&user),
        ReadTarget::Threads(request.thread_ids),
    )
    .await
}

async fn mark_read(
    state: &AppState,
    viewer: ViewerKey,
    target: ReadTarget,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let result = state
        .mark_read_handler()
        .handle(MarkReadCommand { viewer, target })
        .await?;

    Ok(Json(MarkReadResponse {
        newly_read: result.newly_read,
        unread: result.unread,
    }))
}

/// GET /api/unread - Badge counts for the session viewer
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let unread = state
        .unread_count_handler()
        .handle(UnreadCountQuery {
            viewer: ViewerKey::from(&user),
        })
        .await?;

    Ok(Json(unread))
}

// ════════════════════════════════════════════════════════════════════════════════
// Threads
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/threads
pub async fn list_threads(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let threads = state
        .list_threads_handler()
        .handle(ListThreadsQuery {
            viewer: ViewerKey::from(&user),
        })
        .await?;

    Ok(Json(ThreadListResponse { threads }))
}

/// POST /api/threads - Open a thread between an entrepreneur and their mentor
pub async fn start_thread(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<StartThreadRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let thread = state
        .start_thread_handler()
        .handle(StartThreadCommand {
            actor: user,
            entrepreneur_email: request.entrepreneur_email,
            mentor_email: request.mentor_email,
            subject: request.subject,
            message: request.message,
            attachments: request.attachments,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ThreadResponse { thread })))
}

/// POST /api/threads/:id/entries
pub async fn append_thread_entry(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(thread_id): Path<ThreadId>,
    Json(request): Json<AppendEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let thread = state
        .append_thread_entry_handler()
        .handle(AppendThreadEntryCommand {
            actor: user,
            thread_id,
            message: request.message,
            attachments: request.attachments,
        })
        .await?;

    Ok(Json(ThreadResponse { thread }))
}

/// POST /api/threads/:id/close
pub async fn close_thread(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(thread_id): Path<ThreadId>,
) -> Result<impl IntoResponse, ApiError> {
    let thread = state
        .close_thread_handler()
        .handle(CloseThreadCommand {
            actor: user,
            thread_id,
        })
        .await?;

    Ok(Json(ThreadResponse { thread }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Notes
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/assignments/:id/notes
pub async fn list_notes(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(assignment_id): Path<AssignmentId>,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state
        .list_notes_handler()
        .handle(ListNotesQuery {
            actor: user,
            assignment_id,
        })
        .await?;

    Ok(Json(NoteListResponse { notes }))
}

/// POST /api/assignments/:id/notes - Assigned mentor adds a note
pub async fn add_note(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(assignment_id): Path<AssignmentId>,
    Json(request): Json<AddNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state
        .add_note_handler()
        .handle(AddNoteCommand {
            actor: user,
            assignment_id,
            text: request.text,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(NoteResponse { note })))
}

/// POST /api/assignments/:id/notes/:note_id/completion
pub async fn set_note_completion(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((assignment_id, note_id)): Path<(AssignmentId, NoteId)>,
    Json(request): Json<NoteCompletionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state
        .set_note_completion_handler()
        .handle(SetNoteCompletionCommand {
            actor: user,
            assignment_id,
            note_id,
            completed: request.completed,
        })
        .await?;

    Ok(Json(NoteResponse { note }))
}

/// Bodies over the route limit can only be oversized attachments.
fn note_response_rejection(rejection: JsonRejection) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Note response body over limit");
        return MessagingError::invalid_attachment(format!(
            "file exceeds the {} MB limit",
            MAX_ATTACHMENT_BYTES / (1024 * 1024)
        ))
        .into();
    }
    ApiError::bad_request("body", rejection.body_text())
}

/// POST /api/assignments/:id/notes/:note_id/responses - Entrepreneur replies
pub async fn respond_to_note(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((assignment_id, note_id)): Path<(AssignmentId, NoteId)>,
    request: Result<Json<NoteResponseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request.map_err(note_response_rejection)?;
    let response = request.into_draft()?;
    let notes = state
        .respond_to_note_handler()
        .handle(RespondToNoteCommand {
            actor: user,
            assignment_id,
            note_id,
            response,
        })
        .await?;

    Ok(Json(NoteListResponse { notes }))
}
