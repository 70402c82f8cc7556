//! Console API router — mounts all console endpoints under /api/v1/console.

use crate::handlers::{self, ConsoleState};
use axum::routing::get;
use axum::Router;

/// Build the console router with all endpoints.
/// Returns a Router that should be merged into the main app.
pub fn console_router(state: ConsoleState) -> Router {
    Router::new()
        // Organizations
        .route(
            "/api/v1/console/organizations",
            get(handlers::list_organizations).post(handlers::create_organization),
        )
        // Campaigns view: list / search / sort for one organization
        .route(
            "/api/v1/console/organizations/:id/campaigns",
            get(handlers::list_campaigns).post(handlers::create_campaign),
        )
        .route(
            "/api/v1/console/campaigns/:id",
            get(handlers::get_campaign),
        )
        // Pledges
        .route(
            "/api/v1/console/campaigns/:id/pledges",
            get(handlers::list_pledges).post(handlers::create_pledge),
        )
        // Audit log
        .route("/api/v1/console/audit-log", get(handlers::audit_log))
        .with_state(state)
}
