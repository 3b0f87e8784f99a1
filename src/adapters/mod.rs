//! Adapters - Implementations of port interfaces.
//!
//! - `postgres` / `memory` - Repositories
//! - `storage` - Read-state stores (YAML files, in-memory)
//! - `stripe` - Hosted checkout and webhook verification
//! - `email` - Transactional email
//! - `ai` - Answer rewriting
//! - `attachments` - File uploads
//! - `auth` - Session token validation
//! - `events` - Audit event bus
//! - `http` - axum REST API

pub mod ai;
pub mod attachments;
pub mod auth;
pub mod email;
pub mod events;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
pub mod stripe;

pub use events::InMemoryEventBus;
