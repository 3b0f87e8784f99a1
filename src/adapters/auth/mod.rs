//! Session validation adapters.
//!
//! - `JwtSessionValidator` - HS256 tokens from the external auth provider
//! - `MockSessionValidator` - Fixed token table for development and tests

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtSessionValidator, SessionClaims};
pub use mock::MockSessionValidator;
