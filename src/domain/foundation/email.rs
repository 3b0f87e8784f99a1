//! Email address value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A normalized (trimmed, lowercased) email address.
///
/// Participants are addressed by email throughout messaging, so comparisons
/// must be case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let normalized = raw.as_ref().trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let (local, domain) = normalized
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing '@'"))?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "malformed address"));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "contains whitespace"));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        let email = EmailAddress::new("  Ada@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn email_rejects_empty() {
        assert_eq!(
            EmailAddress::new("   "),
            Err(ValidationError::empty_field("email"))
        );
    }

    #[test]
    fn email_rejects_missing_at_or_parts() {
        assert!(EmailAddress::new("nobody").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("ada@").is_err());
        assert!(EmailAddress::new("a@b@c").is_err());
        assert!(EmailAddress::new("a da@example.com").is_err());
    }

    #[test]
    fn email_deserialization_validates() {
        assert!(serde_json::from_str::<EmailAddress>("\"not-an-email\"").is_err());
        let ok: EmailAddress = serde_json::from_str("\"M@X.io\"").unwrap();
        assert_eq!(ok.as_str(), "m@x.io");
    }
}
