pub mod destinations;
pub mod trips;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::errors::ServiceError;
use service::pagination::{PageRequest, Pagination, Sort, SortField};

use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Turn raw list query parameters into a page request.
pub(crate) fn page_request<F: SortField>(
    page: Option<u32>,
    per_page: Option<u32>,
    sort: Option<&str>,
) -> Result<PageRequest<F>, ServiceError> {
    let sort = Sort::parse(sort.unwrap_or_default())?;
    Ok(PageRequest::new(Pagination::new(page, per_page), sort))
}

/// Build the full application router: health, resources and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let destinations = Router::new()
        .route("/destinations", get(destinations::list).post(destinations::create))
        .route(
            "/destinations/:id",
            get(destinations::get).put(destinations::update).delete(destinations::delete),
        );

    let trips = Router::new()
        .route("/trips", get(trips::list).post(trips::create))
        .route("/trips/:id", get(trips::get).put(trips::update).delete(trips::delete));

    Router::new()
        .route("/health", get(health))
        .merge(destinations)
        .merge(trips)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
