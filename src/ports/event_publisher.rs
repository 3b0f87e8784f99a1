//! Outbound audit events.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Sink for audit events.
///
/// Handlers publish after the state change is persisted and only log a
/// failure; the change stands either way.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publishes in order, stopping at the first failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
