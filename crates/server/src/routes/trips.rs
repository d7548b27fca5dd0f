use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use service::pagination::Page;
use service::trip::domain::{Trip, TripCandidate, TripSort};
use tracing::info;

use crate::errors::ApiError;
use crate::extract::{check, into_result, require, ApiPath, ApiQuery, FieldErrors, Validate, ValidatedJson};
use crate::routes::page_request;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TripListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// `field[,asc|desc]` over `id`, `start_date`, `end_date`, `price`
    pub sort: Option<String>,
    pub destination_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TripInput {
    /// `YYYY-MM-DD`
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub destination_id: Option<i64>,
}

impl Validate for TripInput {
    /// Date rules run in `TripService` once the destination is known.
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "start_date", &self.start_date);
        require(&mut errors, "end_date", &self.end_date);
        require(&mut errors, "price", &self.price);
        if let Some(price) = self.price {
            check(&mut errors, "price", models::trip::validate_price(price));
        }
        require(&mut errors, "destination_id", &self.destination_id);
        into_result(errors)
    }
}

impl TripInput {
    /// Only called after `validate` succeeded.
    fn into_candidate(self) -> TripCandidate {
        TripCandidate {
            start_date: self.start_date,
            end_date: self.end_date,
            price: self.price.unwrap_or_default(),
            destination_id: self.destination_id.unwrap_or_default(),
        }
    }
}

#[utoipa::path(
    get, path = "/trips", tag = "trips",
    params(TripListQuery),
    responses(
        (status = 200, description = "Page of trips", body = crate::openapi::TripPageDoc),
        (status = 400, description = "Bad query", body = ApiError)
    )
)]
pub async fn list(State(state): State<AppState>, ApiQuery(q): ApiQuery<TripListQuery>) -> Result<Json<Page<Trip>>, ApiError> {
    let req = page_request::<TripSort>(q.page, q.per_page, q.sort.as_deref())?;
    Ok(Json(state.trips.list(req, q.destination_id).await?))
}

#[utoipa::path(
    get, path = "/trips/{id}", tag = "trips",
    params(("id" = i64, Path, description = "Trip id")),
    responses(
        (status = 200, description = "Trip", body = crate::openapi::TripDoc),
        (status = 404, description = "Not found", body = ApiError)
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<Json<Trip>, ApiError> {
    Ok(Json(state.trips.get(id).await?))
}

#[utoipa::path(
    post, path = "/trips", tag = "trips",
    request_body = TripInput,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TripDoc),
        (status = 400, description = "Validation errors", body = ApiError),
        (status = 404, description = "Destination not found", body = ApiError)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<TripInput>,
) -> Result<(StatusCode, Json<Trip>), ApiError> {
    let created = state.trips.create(input.into_candidate()).await?;
    info!(trip_id = created.id, destination_id = created.destination_id, "trip_create");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/trips/{id}", tag = "trips",
    params(("id" = i64, Path, description = "Trip id")),
    request_body = TripInput,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TripDoc),
        (status = 400, description = "Validation errors", body = ApiError),
        (status = 404, description = "Trip or destination not found", body = ApiError)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(input): ValidatedJson<TripInput>,
) -> Result<Json<Trip>, ApiError> {
    let updated = state.trips.update(id, input.into_candidate()).await?;
    info!(trip_id = updated.id, "trip_update");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/trips/{id}", tag = "trips",
    params(("id" = i64, Path, description = "Trip id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ApiError)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, ApiError> {
    state.trips.delete(id).await?;
    info!(trip_id = id, "trip_delete");
    Ok(StatusCode::NO_CONTENT)
}
