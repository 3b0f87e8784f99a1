//! PostgreSQL read-cursor store.
//!
//! Server-recorded read state: unlike the file store, a viewer's badge
//! follows them across devices.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::messaging::{ReadState, ViewerKey};
use crate::ports::{ReadStateError, ReadStateStore};

pub struct PostgresReadCursorStore {
    pool: PgPool,
}

impl PostgresReadCursorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadStateStore for PostgresReadCursorStore {
    async fn load(&self, viewer: &ViewerKey) -> Result<ReadState, ReadStateError> {
        let state: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT state FROM read_cursors WHERE viewer_role = $1 AND viewer_email = $2",
        )
        .bind(viewer.role.as_str())
        .bind(viewer.email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ReadStateError::DatabaseError(e.to_string()))?;

        match state {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ReadStateError::DeserializationFailed(e.to_string())),
            None => Ok(ReadState::default()),
        }
    }

    async fn save(&self, viewer: &ViewerKey, state: &ReadState) -> Result<(), ReadStateError> {
        let value = serde_json::to_value(state)
            .map_err(|e| ReadStateError::SerializationFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO read_cursors (viewer_role, viewer_email, state, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (viewer_role, viewer_email) DO UPDATE SET
                state = EXCLUDED.state,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(viewer.role.as_str())
        .bind(viewer.email.as_str())
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| ReadStateError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
