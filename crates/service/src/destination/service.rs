use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{same_name, Destination, DestinationCandidate, DestinationSort};
use super::repository::DestinationRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

const ENTITY: &str = "Destination";

/// Destination business service independent of web framework.
pub struct DestinationService<R: DestinationRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: DestinationRepository + ?Sized> DestinationService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// List destinations, optionally keeping those whose country contains
    /// `country` ignoring case. A blank filter lists everything.
    #[instrument(skip(self))]
    pub async fn list(&self, req: PageRequest<DestinationSort>, country: Option<&str>) -> Result<Page<Destination>, ServiceError> {
        let country = country.map(str::trim).filter(|c| !c.is_empty());
        debug!(sort = %req.sort, ?country, "listing destinations");
        let page = self.repo.list(country, &req).await?;
        info!(total = page.total_items, returned = page.items.len(), "destinations listed");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Destination, ServiceError> {
        let found = self.repo.find_by_id(id).await?.ok_or_else(|| {
            warn!(destination_id = id, "destination not found");
            ServiceError::not_found(ENTITY)
        })?;
        debug!(destination_id = id, name = %found.name, "destination found");
        Ok(found)
    }

    /// Create a destination with a name not yet taken (ignoring case).
    ///
    /// # Examples
    /// ```
    /// use service::destination::{domain::DestinationCandidate, DestinationService};
    /// use service::mock::MockTravelStore;
    /// use std::sync::Arc;
    /// let svc = DestinationService::new(Arc::new(MockTravelStore::default()));
    /// let created = tokio_test::block_on(svc.create(DestinationCandidate::new("Berlin", "Germany"))).unwrap();
    /// assert_eq!(created.id, 1);
    /// let dup = tokio_test::block_on(svc.create(DestinationCandidate::new("berlin", "Germany")));
    /// assert!(matches!(dup, Err(service::errors::ServiceError::Conflict(_))));
    /// ```
    #[instrument(skip(self), fields(name = %candidate.name))]
    pub async fn create(&self, candidate: DestinationCandidate) -> Result<Destination, ServiceError> {
        if self.repo.exists_by_name_ignore_case(&candidate.name).await? {
            warn!(name = %candidate.name, "destination name already taken");
            return Err(ServiceError::already_exists(ENTITY));
        }
        let saved = self.repo.insert(&candidate).await?;
        info!(destination_id = saved.id, "destination created");
        Ok(saved)
    }

    /// Overwrite name and country. The uniqueness check only runs when the
    /// name changes ignoring case, so re-saving the same name never conflicts.
    #[instrument(skip(self), fields(name = %candidate.name))]
    pub async fn update(&self, id: i64, candidate: DestinationCandidate) -> Result<Destination, ServiceError> {
        let existing = self.get(id).await?;
        if !same_name(&existing.name, &candidate.name)
            && self.repo.exists_by_name_ignore_case(&candidate.name).await?
        {
            warn!(destination_id = id, name = %candidate.name, "rename collides with existing destination");
            return Err(ServiceError::already_exists(ENTITY));
        }
        let updated = self.repo.update(id, &candidate).await?;
        info!(destination_id = updated.id, "destination updated");
        Ok(updated)
    }

    /// Delete a destination together with its trips.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete_cascade(id).await? {
            warn!(destination_id = id, "attempt to delete missing destination");
            return Err(ServiceError::not_found(ENTITY));
        }
        info!(destination_id = id, "destination deleted");
        Ok(())
    }
}
