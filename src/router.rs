//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its utoipa specification, and
//! Swagger UI serves the generated document at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI.
///
/// # Registered Endpoints
/// - `GET /api/availability/{season_id}/{week}/{player_id}` - Availability of one player
/// - `GET /api/availability/{season_id}/{week}/stats` - Availability statistics
/// - `GET /api/availability/{season_id}/{week}/conflicts` - Players with several owners
/// - `GET /api/conferences/{conference_id}/rosters` - Cached Sleeper rosters of a conference
/// - `POST /api/sync` - Run a full synchronization
/// - `GET /api/sync/state` - State of the synchronization engine
/// - `POST /api/sync/stop` - Stop a running synchronization
/// - `GET /api/integrity/audit` - Audit the reconciled data
/// - `POST /api/integrity/cleanup` - Repair what the audit reports
///
/// The OpenAPI specification is served at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Huddle", description = "Huddle API"), tags(
        (name = controller::availability::AVAILABILITY_TAG, description = "Player availability API routes"),
        (name = controller::conference::CONFERENCE_TAG, description = "Conference roster API routes"),
        (name = controller::sync::SYNC_TAG, description = "Synchronization API routes"),
        (name = controller::integrity::INTEGRITY_TAG, description = "Data integrity API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::availability::get_player_availability))
        .routes(routes!(controller::availability::get_availability_stats))
        .routes(routes!(controller::availability::get_ownership_conflicts))
        .routes(routes!(controller::conference::get_conference_rosters))
        .routes(routes!(controller::sync::run_sync))
        .routes(routes!(controller::sync::get_sync_state))
        .routes(routes!(controller::sync::stop_sync))
        .routes(routes!(controller::integrity::audit))
        .routes(routes!(controller::integrity::cleanup))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
