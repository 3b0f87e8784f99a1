//! PostgreSQL implementation of AssignmentRepository.
//!
//! `entrepreneur_id` is unique, so the upsert is last-write-wins when two
//! admins assign the same entrepreneur concurrently.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::assignment::{MentorAssignment, PortfolioNumber};
use crate::domain::foundation::{ApplicantId, AssignmentId, DomainError, Timestamp};
use crate::ports::AssignmentRepository;

use super::{corrupt, db_error};

pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    id: Uuid,
    entrepreneur_id: Uuid,
    mentor_id: Uuid,
    mentor_name: String,
    portfolio_number: i16,
    assigned_at: DateTime<Utc>,
}

impl TryFrom<AssignmentRow> for MentorAssignment {
    type Error = DomainError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(MentorAssignment {
            id: AssignmentId::from_uuid(row.id),
            entrepreneur_id: ApplicantId::from_uuid(row.entrepreneur_id),
            mentor_id: ApplicantId::from_uuid(row.mentor_id),
            mentor_name: row.mentor_name,
            portfolio_number: PortfolioNumber::new(i64::from(row.portfolio_number))
                .map_err(|e| corrupt("portfolio_number", e))?,
            assigned_at: Timestamp::from_datetime(row.assigned_at),
        })
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn upsert(&self, assignment: &MentorAssignment) -> Result<MentorAssignment, DomainError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            INSERT INTO mentor_assignments (
                id, entrepreneur_id, mentor_id, mentor_name, portfolio_number, assigned_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (entrepreneur_id) DO UPDATE SET
                mentor_id = EXCLUDED.mentor_id,
                mentor_name = EXCLUDED.mentor_name,
                portfolio_number = EXCLUDED.portfolio_number,
                assigned_at = EXCLUDED.assigned_at
            RETURNING id, entrepreneur_id, mentor_id, mentor_name, portfolio_number, assigned_at
            "#,
        )
        .bind(assignment.id.as_uuid())
        .bind(assignment.entrepreneur_id.as_uuid())
        .bind(assignment.mentor_id.as_uuid())
        .bind(&assignment.mentor_name)
        .bind(i16::from(assignment.portfolio_number.value()))
        .bind(assignment.assigned_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("upsert assignment", e))?;

        row.try_into()
    }

    async fn find_by_entrepreneur(
        &self,
        entrepreneur_id: &ApplicantId,
    ) -> Result<Option<MentorAssignment>, DomainError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, entrepreneur_id, mentor_id, mentor_name, portfolio_number, assigned_at
            FROM mentor_assignments
            WHERE entrepreneur_id = $1
            "#,
        )
        .bind(entrepreneur_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find assignment", e))?;

        row.map(MentorAssignment::try_from).transpose()
    }

    async fn find_by_id(&self, id: &AssignmentId) -> Result<Option<MentorAssignment>, DomainError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, entrepreneur_id, mentor_id, mentor_name, portfolio_number, assigned_at
            FROM mentor_assignments
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find assignment", e))?;

        row.map(MentorAssignment::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<MentorAssignment>, DomainError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, entrepreneur_id, mentor_id, mentor_name, portfolio_number, assigned_at
            FROM mentor_assignments
            ORDER BY assigned_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list assignments", e))?;

        rows.into_iter().map(MentorAssignment::try_from).collect()
    }
}
