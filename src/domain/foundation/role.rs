//! Marketplace roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Role an applicant signs up as. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Entrepreneur,
    Mentor,
    Coach,
    Investor,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Entrepreneur, Role::Mentor, Role::Coach, Role::Investor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Entrepreneur => "entrepreneur",
            Role::Mentor => "mentor",
            Role::Coach => "coach",
            Role::Investor => "investor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entrepreneur" => Ok(Role::Entrepreneur),
            "mentor" => Ok(Role::Mentor),
            "coach" => Ok(Role::Coach),
            "investor" => Ok(Role::Investor),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Role of whoever is acting or viewing: the admin or one of the applicant roles.
///
/// Read-state watermarks are kept per actor role, so the same email viewing
/// as admin and as mentor has independent unread badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Admin,
    Entrepreneur,
    Mentor,
    Coach,
    Investor,
}

impl ActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorRole::Admin => "admin",
            ActorRole::Entrepreneur => "entrepreneur",
            ActorRole::Mentor => "mentor",
            ActorRole::Coach => "coach",
            ActorRole::Investor => "investor",
        }
    }

    /// The applicant role behind this actor, if any.
    pub fn applicant_role(&self) -> Option<Role> {
        match self {
            ActorRole::Admin => None,
            ActorRole::Entrepreneur => Some(Role::Entrepreneur),
            ActorRole::Mentor => Some(Role::Mentor),
            ActorRole::Coach => Some(Role::Coach),
            ActorRole::Investor => Some(Role::Investor),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, ActorRole::Admin)
    }
}

impl From<Role> for ActorRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Entrepreneur => ActorRole::Entrepreneur,
            Role::Mentor => ActorRole::Mentor,
            Role::Coach => ActorRole::Coach,
            Role::Investor => ActorRole::Investor,
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("admin") {
            return Ok(ActorRole::Admin);
        }
        s.parse::<Role>().map(ActorRole::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Mentor".parse::<Role>().unwrap(), Role::Mentor);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn actor_role_parses_admin_and_applicant_roles() {
        assert_eq!("admin".parse::<ActorRole>().unwrap(), ActorRole::Admin);
        assert_eq!("coach".parse::<ActorRole>().unwrap(), ActorRole::Coach);
        assert!("janitor".parse::<ActorRole>().is_err());
    }

    #[test]
    fn actor_role_round_trips_through_applicant_role() {
        for role in Role::ALL {
            assert_eq!(ActorRole::from(role).applicant_role(), Some(role));
        }
        assert_eq!(ActorRole::Admin.applicant_role(), None);
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Investor).unwrap(), "\"investor\"");
    }
}
