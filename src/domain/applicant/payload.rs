//! Role-specific application payloads.
//!
//! The payload is a tagged union validated at the API boundary, so an
//! applicant's payload always matches its role.

use crate::domain::foundation::{Role, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payment state of an entrepreneur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

/// Entrepreneur application data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntrepreneurPayload {
    /// Idea questionnaire answers keyed by question key.
    #[serde(default)]
    pub idea_answers: BTreeMap<String, String>,

    /// AI-generated review of the idea.
    #[serde(default)]
    pub ai_idea_review: Option<String>,

    /// AI-generated business plan draft.
    #[serde(default)]
    pub business_plan_draft: Option<String>,

    /// Signed up through the community path.
    #[serde(default)]
    pub pre_approved: bool,

    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl EntrepreneurPayload {
    /// True once at least one idea answer has real content.
    pub fn idea_submitted(&self) -> bool {
        self.idea_answers.values().any(|answer| !answer.trim().is_empty())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.idea_answers.keys().any(|key| key.trim().is_empty()) {
            return Err(ValidationError::empty_field("idea_answers.key"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MentorPayload {
    pub expertise: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub years_experience: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoachPayload {
    pub specialties: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub booking_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvestorPayload {
    #[serde(default)]
    pub firm: Option<String>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub check_size: Option<String>,
}

/// Role-tagged application payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ApplicantPayload {
    Entrepreneur(EntrepreneurPayload),
    Mentor(MentorPayload),
    Coach(CoachPayload),
    Investor(InvestorPayload),
}

impl ApplicantPayload {
    pub fn role(&self) -> Role {
        match self {
            ApplicantPayload::Entrepreneur(_) => Role::Entrepreneur,
            ApplicantPayload::Mentor(_) => Role::Mentor,
            ApplicantPayload::Coach(_) => Role::Coach,
            ApplicantPayload::Investor(_) => Role::Investor,
        }
    }

    /// Checks role-specific required content.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ApplicantPayload::Entrepreneur(p) => p.validate(),
            ApplicantPayload::Mentor(p) => require_entries("expertise", &p.expertise),
            ApplicantPayload::Coach(p) => require_entries("specialties", &p.specialties),
            ApplicantPayload::Investor(p) => {
                if p.focus_areas.iter().any(|a| a.trim().is_empty()) {
                    return Err(ValidationError::empty_field("focus_areas"));
                }
                Ok(())
            }
        }
    }

    /// Validates that the payload belongs to `role` and is well-formed.
    pub fn validate_for(&self, role: Role) -> Result<(), ValidationError> {
        if self.role() != role {
            return Err(ValidationError::invalid_format(
                "payload",
                format!("{} payload submitted for {} role", self.role(), role),
            ));
        }
        self.validate()
    }

    pub fn as_entrepreneur(&self) -> Option<&EntrepreneurPayload> {
        match self {
            ApplicantPayload::Entrepreneur(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_entrepreneur_mut(&mut self) -> Option<&mut EntrepreneurPayload> {
        match self {
            ApplicantPayload::Entrepreneur(p) => Some(p),
            _ => None,
        }
    }
}

fn require_entries(field: &str, entries: &[String]) -> Result<(), ValidationError> {
    if entries.is_empty() || entries.iter().all(|e| e.trim().is_empty()) {
        return Err(ValidationError::empty_field(field));
    }
    Ok(())
}
