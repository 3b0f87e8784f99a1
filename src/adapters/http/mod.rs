//! HTTP adapter - axum REST API.
//!
//! One module per context, each with `dto`, `handlers` and `routes`:
//!
//! - `applicant` - Submission, admin review, payments and the Stripe webhook
//! - `assignment` - Admin mentor-portfolio assignment
//! - `messaging` - Messages, threads, read state and mentor notes
//! - `dashboard` - Admin and entrepreneur dashboards
//!
//! `router::build_router` mounts everything under `/api`.

pub mod applicant;
pub mod assignment;
pub mod dashboard;
pub mod error;
pub mod messaging;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_routes, build_router};
pub use state::{AppState, CheckoutUrls};
