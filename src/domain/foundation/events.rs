//! Audit events and the envelope they travel in.
//!
//! Each event type is a plain serde struct; `domain_event!` wires it to
//! [`DomainEvent`] and the blanket [`SerializableDomainEvent`] turns it into
//! an [`EventEnvelope`] for the publisher.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

pub trait DomainEvent: Send + Sync {
    /// Dotted name ending in a version suffix, e.g. `applicant.reviewed.v1`.
    fn event_type(&self) -> &'static str;
    fn aggregate_type(&self) -> &'static str;
    fn aggregate_id(&self) -> String;
    fn occurred_at(&self) -> Timestamp;
    fn event_id(&self) -> EventId;
}

pub trait SerializableDomainEvent: DomainEvent + Serialize {
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope::from_event(self)
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements [`DomainEvent`] for a struct with an `event_id: EventId` field.
///
/// ```ignore
/// domain_event!(ApplicantReviewed => "applicant.reviewed.v1", Applicant(applicant_id), at reviewed_at);
/// ```
#[macro_export]
macro_rules! domain_event {
    ($event:ident => $event_type:literal, $aggregate:ident($id_field:ident), at $at_field:ident) => {
        impl $crate::domain::foundation::DomainEvent for $event {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_type(&self) -> &'static str {
                stringify!($aggregate)
            }

            fn aggregate_id(&self) -> String {
                self.$id_field.to_string()
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$at_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.event_id
            }
        }
    };
}

pub use domain_event;

/// Identity of one published event, used to drop duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub schema_version: u32,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
}

impl EventEnvelope {
    /// Wraps an arbitrary payload; the event is stamped now.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        let event_type = event_type.into();
        Self {
            event_id: EventId::new(),
            schema_version: schema_version_of(&event_type),
            event_type,
            aggregate_type: aggregate_type.into(),
            aggregate_id: aggregate_id.into(),
            occurred_at: Timestamp::now(),
            payload,
        }
    }

    /// An event whose fields fail to serialize is still published, with a
    /// `null` payload.
    pub fn from_event<E>(event: &E) -> Self
    where
        E: DomainEvent + Serialize + ?Sized,
    {
        Self {
            event_id: event.event_id(),
            event_type: event.event_type().to_string(),
            schema_version: schema_version_of(event.event_type()),
            aggregate_type: event.aggregate_type().to_string(),
            aggregate_id: event.aggregate_id(),
            occurred_at: event.occurred_at(),
            payload: serde_json::to_value(event).unwrap_or(JsonValue::Null),
        }
    }
}

/// Version from the trailing `.vN`; unversioned names count as 1.
fn schema_version_of(event_type: &str) -> u32 {
    match event_type.rsplit_once(".v") {
        Some((_, n)) => n.parse().unwrap_or(1),
        None => 1,
    }
}
