//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations across
//! ports. Handlers compute the intended state locally, persist it, and
//! return the repository's authoritative response.

pub mod applicant;
pub mod assignment;
pub mod dashboard;
pub mod messaging;

#[cfg(test)]
pub(crate) mod test_support;

pub use applicant::*;
pub use assignment::*;
pub use dashboard::*;
pub use messaging::*;
