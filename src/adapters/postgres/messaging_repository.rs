//! PostgreSQL implementations of the messaging repositories.
//!
//! Thread entries and note responses are stored as JSONB arrays on their
//! parent row. Writes append a single element with `||` in one guarded
//! UPDATE, so concurrent writers never overwrite each other.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AssignmentId, DomainError, EmailAddress, ErrorCode, MessageId, NoteId, ThreadId, Timestamp,
};
use crate::domain::messaging::{
    Message, MessageThread, MentorNote, NoteResponse, ThreadEntry, ThreadStatus,
};
use crate::ports::{MessageRepository, NoteRepository, ThreadRepository};

use super::{corrupt, db_error};

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::new(ErrorCode::InternalError, format!("Failed to serialize: {}", e))
    })
}

fn from_json<T: DeserializeOwned>(column: &str, value: serde_json::Value) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| corrupt(column, e))
}

fn email(column: &str, raw: &str) -> Result<EmailAddress, DomainError> {
    EmailAddress::new(raw).map_err(|e| corrupt(column, e))
}

// ════════════════════════════════════════════════════════════════════════════
// Messages
// ════════════════════════════════════════════════════════════════════════════

pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    from_email: String,
    from_name: String,
    to_email: String,
    to_name: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = DomainError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Message {
            id: MessageId::from_uuid(row.id),
            from_email: email("from_email", &row.from_email)?,
            from_name: row.from_name,
            to_email: email("to_email", &row.to_email)?,
            to_name: row.to_name,
            message: row.message,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn save(&self, message: &Message) -> Result<Message, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, from_email, from_name, to_email, to_name, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(message.from_email.as_str())
        .bind(&message.from_name)
        .bind(message.to_email.as_str())
        .bind(&message.to_name)
        .bind(&message.message)
        .bind(message.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("save message", e))?;

        Ok(message.clone())
    }

    async fn list_for(&self, email: &EmailAddress) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, from_email, from_name, to_email, to_name, message, created_at
            FROM messages
            WHERE from_email = $1 OR to_email = $1
            ORDER BY created_at
            "#,
        )
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list messages", e))?;

        rows.into_iter().map(Message::try_from).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Threads
// ════════════════════════════════════════════════════════════════════════════

pub struct PostgresThreadRepository {
    pool: PgPool,
}

impl PostgresThreadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ThreadRow {
    id: Uuid,
    entrepreneur_email: String,
    mentor_email: String,
    subject: String,
    status: String,
    entries: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_thread_status(s: &str) -> Result<ThreadStatus, DomainError> {
    match s {
        "open" => Ok(ThreadStatus::Open),
        "closed" => Ok(ThreadStatus::Closed),
        other => Err(corrupt("thread status", other)),
    }
}

fn thread_status_str(status: ThreadStatus) -> &'static str {
    match status {
        ThreadStatus::Open => "open",
        ThreadStatus::Closed => "closed",
    }
}

impl TryFrom<ThreadRow> for MessageThread {
    type Error = DomainError;

    fn try_from(row: ThreadRow) -> Result<Self, Self::Error> {
        Ok(MessageThread {
            id: ThreadId::from_uuid(row.id),
            entrepreneur_email: email("entrepreneur_email", &row.entrepreneur_email)?,
            mentor_email: email("mentor_email", &row.mentor_email)?,
            subject: row.subject,
            status: parse_thread_status(&row.status)?,
            entries: from_json("entries", row.entries)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

impl PostgresThreadRepository {
    /// Explains why a guarded UPDATE matched no row.
    async fn guard_failure(&self, id: &ThreadId) -> DomainError {
        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM message_threads WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await;

        match status {
            Ok(Some(_)) => DomainError::new(
                ErrorCode::ThreadClosed,
                format!("Thread {} is closed", id),
            ),
            Ok(None) => DomainError::new(
                ErrorCode::ThreadNotFound,
                format!("Thread not found: {}", id),
            ),
            Err(e) => db_error("check thread status", e),
        }
    }
}

const THREAD_COLUMNS: &str =
    "id, entrepreneur_email, mentor_email, subject, status, entries, created_at, updated_at";

#[async_trait]
impl ThreadRepository for PostgresThreadRepository {
    async fn create(&self, thread: &MessageThread) -> Result<MessageThread, DomainError> {
        sqlx::query(&format!(
            "INSERT INTO message_threads ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            THREAD_COLUMNS
        ))
        .bind(thread.id.as_uuid())
        .bind(thread.entrepreneur_email.as_str())
        .bind(thread.mentor_email.as_str())
        .bind(&thread.subject)
        .bind(thread_status_str(thread.status))
        .bind(to_json(&thread.entries)?)
        .bind(thread.created_at.as_datetime())
        .bind(thread.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("create thread", e))?;

        Ok(thread.clone())
    }

    async fn append_entry(
        &self,
        id: &ThreadId,
        entry: &ThreadEntry,
    ) -> Result<MessageThread, DomainError> {
        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            r#"
            UPDATE message_threads
            SET entries = entries || jsonb_build_array($2::jsonb), updated_at = $3
            WHERE id = $1 AND status = 'open'
            RETURNING {}
            "#,
            THREAD_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(to_json(entry)?)
        .bind(entry.created_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("append thread entry", e))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(self.guard_failure(id).await),
        }
    }

    async fn close(
        &self,
        id: &ThreadId,
        closed_at: Timestamp,
    ) -> Result<MessageThread, DomainError> {
        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            r#"
            UPDATE message_threads SET status = 'closed', updated_at = $2
            WHERE id = $1 AND status = 'open'
            RETURNING {}
            "#,
            THREAD_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(closed_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("close thread", e))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(self.guard_failure(id).await),
        }
    }

    async fn find_by_id(&self, id: &ThreadId) -> Result<Option<MessageThread>, DomainError> {
        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            "SELECT {} FROM message_threads WHERE id = $1",
            THREAD_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find thread", e))?;

        row.map(MessageThread::try_from).transpose()
    }

    async fn list_for(&self, email: &EmailAddress) -> Result<Vec<MessageThread>, DomainError> {
        let rows = sqlx::query_as::<_, ThreadRow>(&format!(
            r#"
            SELECT {} FROM message_threads
            WHERE entrepreneur_email = $1 OR mentor_email = $1
            ORDER BY updated_at DESC
            "#,
            THREAD_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list threads", e))?;

        rows.into_iter().map(MessageThread::try_from).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Notes
// ════════════════════════════════════════════════════════════════════════════

pub struct PostgresNoteRepository {
    pool: PgPool,
}

impl PostgresNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NoteRow {
    id: Uuid,
    assignment_id: Uuid,
    text: String,
    completed: bool,
    responses: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for MentorNote {
    type Error = DomainError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        Ok(MentorNote {
            id: NoteId::from_uuid(row.id),
            assignment_id: AssignmentId::from_uuid(row.assignment_id),
            text: row.text,
            timestamp: Timestamp::from_datetime(row.created_at),
            completed: row.completed,
            responses: from_json("responses", row.responses)?,
        })
    }
}

const NOTE_COLUMNS: &str = "id, assignment_id, text, completed, responses, created_at";

fn note_not_found(id: &NoteId) -> DomainError {
    DomainError::new(ErrorCode::NoteNotFound, format!("Note not found: {}", id))
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn create(&self, note: &MentorNote) -> Result<MentorNote, DomainError> {
        let row = sqlx::query_as::<_, NoteRow>(&format!(
            r#"
            INSERT INTO mentor_notes ({})
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            NOTE_COLUMNS, NOTE_COLUMNS
        ))
        .bind(note.id.as_uuid())
        .bind(note.assignment_id.as_uuid())
        .bind(&note.text)
        .bind(note.completed)
        .bind(to_json(&note.responses)?)
        .bind(note.timestamp.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create note", e))?;

        row.try_into()
    }

    async fn add_response(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        response: &NoteResponse,
    ) -> Result<MentorNote, DomainError> {
        let row = sqlx::query_as::<_, NoteRow>(&format!(
            r#"
            UPDATE mentor_notes SET responses = responses || jsonb_build_array($3::jsonb)
            WHERE id = $1 AND assignment_id = $2
            RETURNING {}
            "#,
            NOTE_COLUMNS
        ))
        .bind(note_id.as_uuid())
        .bind(assignment_id.as_uuid())
        .bind(to_json(response)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("add note response", e))?;

        row.ok_or_else(|| note_not_found(note_id))?.try_into()
    }

    async fn set_completed(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
        completed: bool,
    ) -> Result<MentorNote, DomainError> {
        let row = sqlx::query_as::<_, NoteRow>(&format!(
            r#"
            UPDATE mentor_notes SET completed = $3
            WHERE id = $1 AND assignment_id = $2
            RETURNING {}
            "#,
            NOTE_COLUMNS
        ))
        .bind(note_id.as_uuid())
        .bind(assignment_id.as_uuid())
        .bind(completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("set note completion", e))?;

        row.ok_or_else(|| note_not_found(note_id))?.try_into()
    }

    async fn find(
        &self,
        assignment_id: &AssignmentId,
        note_id: &NoteId,
    ) -> Result<Option<MentorNote>, DomainError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, assignment_id, text, completed, responses, created_at
            FROM mentor_notes
            WHERE id = $1 AND assignment_id = $2
            "#,
        )
        .bind(note_id.as_uuid())
        .bind(assignment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find note", e))?;

        row.map(MentorNote::try_from).transpose()
    }

    async fn list_for_assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<MentorNote>, DomainError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, assignment_id, text, completed, responses, created_at
            FROM mentor_notes
            WHERE assignment_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(assignment_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list notes", e))?;

        rows.into_iter().map(MentorNote::try_from).collect()
    }
}
