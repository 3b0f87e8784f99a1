//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, roles, email, events, errors)
//! - `applicant` - Application records and the status transition engine
//! - `assignment` - Mentor-portfolio assignments
//! - `payment_gate` - Tier evaluation and feature visibility
//! - `messaging` - Messages, threads, notes and read state
//! - `dashboard` - Admin and entrepreneur projections

pub mod applicant;
pub mod assignment;
pub mod dashboard;
pub mod foundation;
pub mod messaging;
pub mod payment_gate;
