//! One-shot messages (admin broadcasts and direct notes between users).

use crate::domain::foundation::{EmailAddress, MessageId, Timestamp};
use serde::{Deserialize, Serialize};

use super::MessagingError;

/// Sender or recipient of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub email: EmailAddress,
    pub name: String,
}

impl Participant {
    pub fn new(email: EmailAddress, name: impl Into<String>) -> Self {
        Self {
            email,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub from_email: EmailAddress,
    pub from_name: String,
    pub to_email: EmailAddress,
    pub to_name: String,
    pub message: String,
    pub created_at: Timestamp,
}

impl Message {
    pub fn compose(
        from: Participant,
        to: Participant,
        text: impl Into<String>,
    ) -> Result<Self, MessagingError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(MessagingError::validation("message", "message cannot be empty"));
        }

        Ok(Self {
            id: MessageId::new(),
            from_email: from.email,
            from_name: from.name,
            to_email: to.email,
            to_name: to.name,
            message: text,
            created_at: Timestamp::now(),
        })
    }

    pub fn is_addressed_to(&self, email: &EmailAddress) -> bool {
        &self.to_email == email
    }

    pub fn involves(&self, email: &EmailAddress) -> bool {
        &self.to_email == email || &self.from_email == email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(email: &str, name: &str) -> Participant {
        Participant::new(EmailAddress::new(email).unwrap(), name)
    }

    #[test]
    fn compose_rejects_blank_text() {
        let result = Message::compose(p("admin@x.io", "Admin"), p("e@x.io", "Erin"), "  \n");
        assert!(matches!(result, Err(MessagingError::ValidationFailed { .. })));
    }

    #[test]
    fn compose_addresses_recipient() {
        let m = Message::compose(p("admin@x.io", "Admin"), p("e@x.io", "Erin"), "Welcome!")
            .unwrap();
        assert!(m.is_addressed_to(&EmailAddress::new("E@x.io").unwrap()));
        assert!(!m.is_addressed_to(&m.from_email));
        assert!(m.involves(&m.from_email));
    }
}
