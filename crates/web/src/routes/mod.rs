//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, services, achievements)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Tracking (public)
//! GET  /tracking               - Tracking lookup form
//! GET  /tracking/lookup        - Form redirect to canonical URL
//! GET  /tracking/{reference}   - Tracking result
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Dashboard (admin role required)
//! GET  /dashboard                        - Shipments list
//! POST /dashboard/shipments              - Create shipment
//! POST /dashboard/shipments/{id}/updates - Append tracking update
//! GET  /dashboard/charts                 - Charts
//! GET  /dashboard/chat                   - Operations chat console
//!
//! # JSON API (session required)
//! GET  /api/active-shipment    - Count of undelivered shipments
//! GET  /api/shipments          - All shipments with history
//! POST /api/pusher-auth        - Real-time channel authorization
//! POST /api/chat/messages      - Post a chat message (admin)
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod home;
pub mod tracking;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the tracking routes router.
pub fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(tracking::index))
        .route("/lookup", get(tracking::lookup))
        .route("/{reference}", get(tracking::show))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::shipments))
        .route("/shipments", post(dashboard::create_shipment))
        .route(
            "/shipments/{id}/updates",
            post(dashboard::append_update),
        )
        .route("/charts", get(dashboard::charts))
        .route("/chat", get(dashboard::chat))
}

/// Create all routes for the web application.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Public tracking
        .nest("/tracking", tracking_routes())
        // Auth routes
        .nest("/auth", auth_routes())
        // Operations dashboard
        .nest("/dashboard", dashboard_routes())
        // JSON API
        .nest("/api", api::routes())
}
