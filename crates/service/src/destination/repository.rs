use async_trait::async_trait;

use super::domain::{Destination, DestinationCandidate, DestinationSort};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

/// Persistence port for destinations.
///
/// Implementations must treat the name as unique ignoring case and report a
/// violation as `ServiceError::Conflict`, even when the service-level check
/// raced with a concurrent write.
#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// Destinations whose country contains `country` (ignoring case), or all.
    async fn list(&self, country: Option<&str>, req: &PageRequest<DestinationSort>) -> Result<Page<Destination>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Destination>, ServiceError>;
    async fn exists(&self, id: i64) -> Result<bool, ServiceError>;
    async fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, ServiceError>;
    async fn insert(&self, candidate: &DestinationCandidate) -> Result<Destination, ServiceError>;
    /// Overwrite name and country; `NotFound` if the row vanished.
    async fn update(&self, id: i64, candidate: &DestinationCandidate) -> Result<Destination, ServiceError>;
    /// Remove the destination and every trip referencing it atomically.
    /// Returns `false` when no destination had this id.
    async fn delete_cascade(&self, id: i64) -> Result<bool, ServiceError>;
}
