//! MentorHub - mentorship marketplace backend
//!
//! Entrepreneurs and mentors apply, admins review them, and approved
//! entrepreneurs are matched into mentor portfolios. Paid entrepreneurs
//! unlock the Founders Circle tier with threaded conversations, while every
//! assignment carries mentor notes and direct messaging.
//!
//! Layers follow a ports-and-adapters layout: `domain` holds the rules,
//! `ports` the traits the application needs, `application` the command and
//! query handlers, and `adapters` the concrete infrastructure.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
