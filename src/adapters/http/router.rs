//! Top-level axum router.
//!
//! Every endpoint lives under `/api`. The auth middleware runs on all of
//! them and only injects the actor; handlers decide whether a session is
//! required.

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::applicant::{admin_applicant_routes, applicant_routes, payment_routes, webhook_routes};
use super::assignment::admin_assignment_routes;
use super::dashboard::dashboard_routes;
use super::messaging::{message_routes, note_routes, thread_routes, unread_routes};
use super::middleware::auth_middleware;
use super::state::AppState;

/// All API routes, relative to `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/applicants", applicant_routes())
        .nest("/admin/applicants", admin_applicant_routes())
        .nest("/admin/assignments", admin_assignment_routes())
        .nest("/payments", payment_routes())
        .nest("/webhooks", webhook_routes())
        .nest("/messages", message_routes())
        .nest("/threads", thread_routes())
        .nest("/assignments", note_routes())
        .merge(unread_routes())
        .merge(dashboard_routes())
}

/// Builds the application with auth, timeout, CORS and tracing layers.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let validator = state.session_validator.clone();
    Router::new()
        .nest("/api", api_routes())
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive when no origins are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
