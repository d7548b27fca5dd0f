use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use service::destination::domain::{Destination, DestinationCandidate, DestinationSort};
use service::pagination::Page;
use tracing::info;

use crate::errors::ApiError;
use crate::extract::{check, into_result, ApiPath, ApiQuery, FieldErrors, Validate, ValidatedJson};
use crate::routes::page_request;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DestinationListQuery {
    /// 1-based page index
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// `field[,asc|desc]` over `id`, `name`, `country`
    pub sort: Option<String>,
    /// Case-insensitive substring of the country
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DestinationInput {
    pub name: Option<String>,
    pub country: Option<String>,
}

impl Validate for DestinationInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check(&mut errors, "name", models::destination::validate_name(self.name.as_deref().unwrap_or_default()));
        check(&mut errors, "country", models::destination::validate_country(self.country.as_deref().unwrap_or_default()));
        into_result(errors)
    }
}

impl From<DestinationInput> for DestinationCandidate {
    fn from(i: DestinationInput) -> Self {
        DestinationCandidate::new(i.name.unwrap_or_default(), i.country.unwrap_or_default())
    }
}

#[utoipa::path(
    get, path = "/destinations", tag = "destinations",
    params(DestinationListQuery),
    responses(
        (status = 200, description = "Page of destinations", body = crate::openapi::DestinationPageDoc),
        (status = 400, description = "Bad query", body = ApiError)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<DestinationListQuery>,
) -> Result<Json<Page<Destination>>, ApiError> {
    let req = page_request::<DestinationSort>(q.page, q.per_page, q.sort.as_deref())?;
    let page = state.destinations.list(req, q.country.as_deref()).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/destinations/{id}", tag = "destinations",
    params(("id" = i64, Path, description = "Destination id")),
    responses(
        (status = 200, description = "Destination", body = crate::openapi::DestinationDoc),
        (status = 404, description = "Not found", body = ApiError)
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Destination>, ApiError> {
    Ok(Json(state.destinations.get(id).await?))
}

#[utoipa::path(
    post, path = "/destinations", tag = "destinations",
    request_body = DestinationInput,
    responses(
        (status = 201, description = "Created", body = crate::openapi::DestinationDoc),
        (status = 400, description = "Validation errors", body = ApiError),
        (status = 409, description = "Name already taken", body = ApiError)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<DestinationInput>,
) -> Result<(StatusCode, Json<Destination>), ApiError> {
    let created = state.destinations.create(input.into()).await?;
    info!(destination_id = created.id, name = %created.name, "destination_create");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/destinations/{id}", tag = "destinations",
    params(("id" = i64, Path, description = "Destination id")),
    request_body = DestinationInput,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::DestinationDoc),
        (status = 400, description = "Validation errors", body = ApiError),
        (status = 404, description = "Not found", body = ApiError),
        (status = 409, description = "Name already taken", body = ApiError)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(input): ValidatedJson<DestinationInput>,
) -> Result<Json<Destination>, ApiError> {
    let updated = state.destinations.update(id, input.into()).await?;
    info!(destination_id = updated.id, "destination_update");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/destinations/{id}", tag = "destinations",
    params(("id" = i64, Path, description = "Destination id")),
    responses(
        (status = 204, description = "Deleted with its trips"),
        (status = 404, description = "Not found", body = ApiError)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, ApiError> {
    state.destinations.delete(id).await?;
    info!(destination_id = id, "destination_delete");
    Ok(StatusCode::NO_CONTENT)
}
