use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::routes::{destinations::DestinationInput, trips::TripInput};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct DestinationDoc {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub trip_ids: Vec<i64>,
}

#[derive(ToSchema)]
pub struct TripDoc {
    pub id: i64,
    #[schema(value_type = String, format = Date)]
    pub start_date: String,
    #[schema(value_type = String, format = Date)]
    pub end_date: String,
    pub price: f64,
    pub destination_id: i64,
    pub destination_name: String,
}

#[derive(ToSchema)]
pub struct DestinationPageDoc {
    pub items: Vec<DestinationDoc>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

#[derive(ToSchema)]
pub struct TripPageDoc {
    pub items: Vec<TripDoc>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::destinations::list,
        crate::routes::destinations::get,
        crate::routes::destinations::create,
        crate::routes::destinations::update,
        crate::routes::destinations::delete,
        crate::routes::trips::list,
        crate::routes::trips::get,
        crate::routes::trips::create,
        crate::routes::trips::update,
        crate::routes::trips::delete,
    ),
    components(
        schemas(
            HealthResponse,
            DestinationDoc,
            DestinationPageDoc,
            TripDoc,
            TripPageDoc,
            DestinationInput,
            TripInput,
            ApiError,
        )
    ),
    tags(
        (name = "health"),
        (name = "destinations"),
        (name = "trips")
    )
)]
pub struct ApiDoc;
