//! PostgreSQL implementation of ApplicantRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::applicant::{Applicant, ApplicantPayload, ApplicationStatus};
use crate::domain::foundation::{
    ApplicantId, DomainError, EmailAddress, ErrorCode, Role, Timestamp,
};
use crate::ports::ApplicantRepository;

use super::{corrupt, db_error};

const SELECT_COLUMNS: &str = r#"
    SELECT id, role, email, name, status, is_resubmitted, is_disabled,
           payload, submitted_at, updated_at
    FROM applicants
"#;

pub struct PostgresApplicantRepository {
    pool: PgPool,
}

impl PostgresApplicantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ApplicantRow {
    id: Uuid,
    role: String,
    email: String,
    name: String,
    status: String,
    is_resubmitted: bool,
    is_disabled: bool,
    payload: serde_json::Value,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicantRow> for Applicant {
    type Error = DomainError;

    fn try_from(row: ApplicantRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(|e| corrupt("role", e))?;
        let payload: ApplicantPayload =
            serde_json::from_value(row.payload).map_err(|e| corrupt("payload", e))?;
        if payload.role() != role {
            return Err(corrupt("payload", format!("payload does not match role {}", role)));
        }

        Ok(Applicant {
            id: ApplicantId::from_uuid(row.id),
            role,
            email: EmailAddress::new(&row.email).map_err(|e| corrupt("email", e))?,
            name: row.name,
            status: row
                .status
                .parse::<ApplicationStatus>()
                .map_err(|e| corrupt("status", e))?,
            is_resubmitted: row.is_resubmitted,
            is_disabled: row.is_disabled,
            submitted_at: Timestamp::from_datetime(row.submitted_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            payload,
        })
    }
}

fn payload_json(applicant: &Applicant) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(&applicant.payload).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to serialize payload: {}", e),
        )
    })
}

#[async_trait]
impl ApplicantRepository for PostgresApplicantRepository {
    async fn save(&self, applicant: &Applicant) -> Result<Applicant, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO applicants (
                id, role, email, name, status, is_resubmitted, is_disabled,
                payload, submitted_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(applicant.id.as_uuid())
        .bind(applicant.role.as_str())
        .bind(applicant.email.as_str())
        .bind(&applicant.name)
        .bind(applicant.status.as_str())
        .bind(applicant.is_resubmitted)
        .bind(applicant.is_disabled)
        .bind(payload_json(applicant)?)
        .bind(applicant.submitted_at.as_datetime())
        .bind(applicant.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("applicants_role_email_key") {
                    return DomainError::validation(
                        "email",
                        format!("{} already applied as {}", applicant.email, applicant.role),
                    );
                }
            }
            db_error("save applicant", e)
        })?;

        Ok(applicant.clone())
    }

    async fn update(&self, applicant: &Applicant) -> Result<Applicant, DomainError> {
        let row = sqlx::query_as::<_, ApplicantRow>(
            r#"
            UPDATE applicants SET
                name = $2,
                status = $3,
                is_resubmitted = $4,
                is_disabled = $5,
                payload = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING id, role, email, name, status, is_resubmitted, is_disabled,
                      payload, submitted_at, updated_at
            "#,
        )
        .bind(applicant.id.as_uuid())
        .bind(&applicant.name)
        .bind(applicant.status.as_str())
        .bind(applicant.is_resubmitted)
        .bind(applicant.is_disabled)
        .bind(payload_json(applicant)?)
        .bind(applicant.updated_at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("update applicant", e))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(DomainError::new(
                ErrorCode::ApplicantNotFound,
                format!("Applicant not found: {}", applicant.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &ApplicantId) -> Result<Option<Applicant>, DomainError> {
        let row = sqlx::query_as::<_, ApplicantRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find applicant", e))?;

        row.map(Applicant::try_from).transpose()
    }

    async fn find_by_email(
        &self,
        role: Role,
        email: &EmailAddress,
    ) -> Result<Option<Applicant>, DomainError> {
        let row = sqlx::query_as::<_, ApplicantRow>(&format!(
            "{} WHERE role = $1 AND email = $2",
            SELECT_COLUMNS
        ))
        .bind(role.as_str())
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find applicant by email", e))?;

        row.map(Applicant::try_from).transpose()
    }

    async fn list_by_role(&self, role: Option<Role>) -> Result<Vec<Applicant>, DomainError> {
        let rows = sqlx::query_as::<_, ApplicantRow>(&format!(
            "{} WHERE ($1::text IS NULL OR role = $1) ORDER BY submitted_at",
            SELECT_COLUMNS
        ))
        .bind(role.map(|r| r.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list applicants", e))?;

        rows.into_iter().map(Applicant::try_from).collect()
    }
}
