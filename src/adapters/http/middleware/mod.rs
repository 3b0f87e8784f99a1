//! HTTP middleware for axum.
//!
//! - `auth` - Session validation middleware and role extractors

pub mod auth;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAdmin, RequireAuth};
