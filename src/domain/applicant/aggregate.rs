//! Applicant aggregate.
//!
//! One record per applicant. Mutating methods only compute the intended
//! next state; callers persist it and adopt the repository's response as
//! the authoritative record.

use crate::domain::foundation::{
    ApplicantId, EmailAddress, Role, StateMachine, Timestamp, ValidationError,
};
use serde::{Deserialize, Serialize};

use super::{
    ApplicantError, ApplicantPayload, ApplicationStatus, EntrepreneurPayload, PaymentStatus,
    ReviewAction,
};

/// Whether a mutation changed the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    Unchanged,
}

impl Change {
    pub fn is_applied(&self) -> bool {
        matches!(self, Change::Applied)
    }
}

/// Applicant aggregate.
///
/// # Invariants
///
/// - `id` and `role` never change after creation
/// - `payload.role() == role`
/// - `status` follows the `ApplicationStatus` graph
/// - `is_resubmitted` is never reset to false
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub role: Role,
    pub email: EmailAddress,
    pub name: String,
    pub status: ApplicationStatus,
    pub is_resubmitted: bool,
    pub is_disabled: bool,
    pub submitted_at: Timestamp,
    pub updated_at: Timestamp,
    pub payload: ApplicantPayload,
}

impl Applicant {
    /// Creates a new application in `submitted` status.
    pub fn submit(
        email: EmailAddress,
        name: impl Into<String>,
        mut payload: ApplicantPayload,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        payload.validate()?;
        // Payment is only ever recorded by confirmation or webhook.
        if let Some(p) = payload.as_entrepreneur_mut() {
            p.payment_status = PaymentStatus::Unpaid;
        }

        let now = Timestamp::now();
        Ok(Self {
            id: ApplicantId::new(),
            role: payload.role(),
            email,
            name: name.trim().to_string(),
            status: ApplicationStatus::Submitted,
            is_resubmitted: false,
            is_disabled: false,
            submitted_at: now,
            updated_at: now,
            payload,
        })
    }

    /// Applies an admin review decision.
    ///
    /// Repeating the decision the record already carries is a no-op.
    pub fn review(&mut self, action: ReviewAction) -> Result<Change, ApplicantError> {
        let target = action.target_status();
        if self.status == target {
            return Ok(Change::Unchanged);
        }

        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| ApplicantError::invalid_transition(self.status.as_str(), action.as_str()))?;
        self.touch();
        Ok(Change::Applied)
    }

    /// Moves a rejected application back to `pending`, flagging it resubmitted.
    ///
    /// A replacement payload, if given, must match the applicant's role.
    pub fn resubmit(&mut self, payload: Option<ApplicantPayload>) -> Result<(), ApplicantError> {
        if let Some(payload) = &payload {
            payload.validate_for(self.role)?;
        }

        self.status = self
            .status
            .transition_to(ApplicationStatus::Pending)
            .map_err(|_| ApplicantError::invalid_transition(self.status.as_str(), "resubmit"))?;
        self.is_resubmitted = true;
        if let Some(mut payload) = payload {
            let paid = self.payment_status();
            if let Some(p) = payload.as_entrepreneur_mut() {
                p.payment_status = paid;
            }
            self.payload = payload;
        }
        self.touch();
        Ok(())
    }

    /// Sets the orthogonal disabled flag.
    pub fn set_disabled(&mut self, disabled: bool) -> Change {
        if self.is_disabled == disabled {
            return Change::Unchanged;
        }
        self.is_disabled = disabled;
        self.touch();
        Change::Applied
    }

    /// Marks an entrepreneur as paid. Idempotent.
    pub fn mark_paid(&mut self) -> Result<Change, ApplicantError> {
        let id = self.id;
        let payload = self
            .payload
            .as_entrepreneur_mut()
            .ok_or_else(|| ApplicantError::not_an_entrepreneur(id))?;

        if payload.payment_status.is_paid() {
            return Ok(Change::Unchanged);
        }
        payload.payment_status = PaymentStatus::Paid;
        self.touch();
        Ok(Change::Applied)
    }

    pub fn entrepreneur(&self) -> Option<&EntrepreneurPayload> {
        self.payload.as_entrepreneur()
    }

    pub fn entrepreneur_mut(&mut self) -> Option<&mut EntrepreneurPayload> {
        self.payload.as_entrepreneur_mut()
    }

    /// Payment state; non-entrepreneurs are always unpaid.
    pub fn payment_status(&self) -> PaymentStatus {
        self.entrepreneur()
            .map(|p| p.payment_status)
            .unwrap_or_default()
    }

    /// Community-path entrepreneur whose application has not been decided.
    pub fn is_pre_approved(&self) -> bool {
        self.status.is_awaiting_review() && self.entrepreneur().map_or(false, |p| p.pre_approved)
    }

    pub fn idea_submitted(&self) -> bool {
        self.entrepreneur().map_or(false, EntrepreneurPayload::idea_submitted)
    }

    pub fn is_approved_mentor(&self) -> bool {
        self.role == Role::Mentor && self.status == ApplicationStatus::Approved
    }

    fn touch(&mut self) {
        let now = Timestamp::now();
        // Keep updated_at strictly increasing even on coarse clocks.
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at.plus_secs(1)
        };
    }
}
