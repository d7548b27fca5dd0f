use async_trait::async_trait;

use super::domain::{NewTrip, Trip, TripSort};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

/// Persistence port for trips. Rows come back joined with the destination name.
#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn list(&self, destination_id: Option<i64>, req: &PageRequest<TripSort>) -> Result<Page<Trip>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Trip>, ServiceError>;
    async fn insert(&self, trip: &NewTrip) -> Result<Trip, ServiceError>;
    async fn update(&self, id: i64, trip: &NewTrip) -> Result<Trip, ServiceError>;
    /// `false` when no row matched.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}
