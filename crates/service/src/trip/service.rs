use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use super::domain::{NewTrip, Trip, TripCandidate, TripSort};
use super::repository::TripRepository;
use crate::clock::{Clock, SystemClock};
use crate::destination::repository::DestinationRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

pub const DATES_REQUIRED: &str = "start and end dates must not be null";
pub const START_AFTER_END: &str = "start date cannot be after end date";
pub const START_IN_PAST: &str = "start date cannot be in the past";

/// Check a trip's date window against `today`, stopping at the first failure.
pub fn validate_dates(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), ServiceError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ServiceError::Validation(DATES_REQUIRED.into()));
    };
    if start > end {
        return Err(ServiceError::Validation(START_AFTER_END.into()));
    }
    if start < today {
        return Err(ServiceError::Validation(START_IN_PAST.into()));
    }
    Ok((start, end))
}

/// Trip business service. Needs the destination store to resolve references.
pub struct TripService<T: TripRepository + ?Sized, D: DestinationRepository + ?Sized> {
    trips: Arc<T>,
    destinations: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<T: TripRepository + ?Sized, D: DestinationRepository + ?Sized> TripService<T, D> {
    pub fn new(trips: Arc<T>, destinations: Arc<D>) -> Self {
        Self::with_clock(trips, destinations, Arc::new(SystemClock))
    }

    pub fn with_clock(trips: Arc<T>, destinations: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self { trips, destinations, clock }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, req: PageRequest<TripSort>, destination_id: Option<i64>) -> Result<Page<Trip>, ServiceError> {
        debug!(sort = %req.sort, ?destination_id, "listing trips");
        let page = self.trips.list(destination_id, &req).await?;
        info!(total = page.total_items, returned = page.items.len(), "trips listed");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Trip, ServiceError> {
        self.trips.find_by_id(id).await?.ok_or_else(|| {
            warn!(trip_id = id, "trip not found");
            ServiceError::not_found("Trip")
        })
    }

    #[instrument(skip(self), fields(destination_id = candidate.destination_id))]
    pub async fn create(&self, candidate: TripCandidate) -> Result<Trip, ServiceError> {
        let row = self.resolve(&candidate).await?;
        let saved = self.trips.insert(&row).await?;
        info!(trip_id = saved.id, "trip created");
        Ok(saved)
    }

    /// Overwrite dates, price and destination of an existing trip.
    #[instrument(skip(self), fields(destination_id = candidate.destination_id))]
    pub async fn update(&self, id: i64, candidate: TripCandidate) -> Result<Trip, ServiceError> {
        self.get(id).await?;
        let row = self.resolve(&candidate).await?;
        let updated = self.trips.update(id, &row).await?;
        info!(trip_id = updated.id, "trip updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.trips.delete(id).await? {
            warn!(trip_id = id, "attempt to delete missing trip");
            return Err(ServiceError::not_found("Trip"));
        }
        info!(trip_id = id, "trip deleted");
        Ok(())
    }

    /// Destination lookup first, then the date window, then price.
    async fn resolve(&self, c: &TripCandidate) -> Result<NewTrip, ServiceError> {
        if !self.destinations.exists(c.destination_id).await? {
            warn!(destination_id = c.destination_id, "trip references missing destination");
            return Err(ServiceError::not_found("Destination"));
        }
        let today = self.clock.today();
        let (start_date, end_date) = validate_dates(c.start_date, c.end_date, today).map_err(|e| {
            warn!(%today, start = ?c.start_date, end = ?c.end_date, reason = %e, "trip dates rejected");
            e
        })?;
        models::trip::validate_price(c.price)?;
        Ok(NewTrip { start_date, end_date, price: c.price, destination_id: c.destination_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::destination::{domain::DestinationCandidate, DestinationService};
    use crate::mock::MockTravelStore;
    use crate::pagination::{Pagination, Sort};
    use models::errors::ModelError;

    fn d(s: &str) -> NaiveDate { NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap() }

    const TODAY: &str = "2030-06-15";

    struct Fixture {
        destinations: DestinationService<MockTravelStore>,
        trips: TripService<MockTravelStore, MockTravelStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MockTravelStore::default());
        Fixture {
            destinations: DestinationService::new(store.clone()),
            trips: TripService::with_clock(store.clone(), store, Arc::new(FixedClock(d(TODAY)))),
        }
    }

    fn cand(start: Option<&str>, end: Option<&str>, price: f64, destination_id: i64) -> TripCandidate {
        TripCandidate { start_date: start.map(d), end_date: end.map(d), price, destination_id }
    }

    fn validation_msg(err: ServiceError) -> String {
        match err {
            ServiceError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn date_rules_short_circuit_in_order() {
        let today = d(TODAY);
        let e = validate_dates(None, Some(d("2000-01-01")), today).unwrap_err();
        assert_eq!(validation_msg(e), DATES_REQUIRED);
        // after-end wins over in-the-past
        let e = validate_dates(Some(d("2001-01-10")), Some(d("2001-01-01")), today).unwrap_err();
        assert_eq!(validation_msg(e), START_AFTER_END);
        let e = validate_dates(Some(d("2030-06-14")), Some(d("2030-06-20")), today).unwrap_err();
        assert_eq!(validation_msg(e), START_IN_PAST);
    }

    #[test]
    fn same_day_trip_starting_today_is_valid() {
        let today = d(TODAY);
        assert_eq!(validate_dates(Some(today), Some(today), today).unwrap(), (today, today));
    }

    #[tokio::test]
    async fn create_trip_carries_destination_name() {
        let f = fixture();
        let berlin = f.destinations.create(DestinationCandidate::new("Berlin", "Germany")).await.unwrap();
        let trip = f
            .trips
            .create(cand(Some("2030-07-01"), Some("2030-07-10"), 1200.0, berlin.id))
            .await
            .unwrap();
        assert_eq!(trip.destination_id, berlin.id);
        assert_eq!(trip.destination_name, "Berlin");
        assert_eq!(f.destinations.get(berlin.id).await.unwrap().trip_ids, vec![trip.id]);
    }

    #[tokio::test]
    async fn create_with_missing_destination_is_not_found_before_dates() {
        let f = fixture();
        let err = f.trips.create(cand(None, None, 10.0, 999)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Destination not found"));
    }

    #[tokio::test]
    async fn create_rejects_bad_windows() {
        let f = fixture();
        let dest = f.destinations.create(DestinationCandidate::new("Rome", "Italy")).await.unwrap();
        let e = f.trips.create(cand(Some("2030-08-10"), Some("2030-08-01"), 10.0, dest.id)).await.unwrap_err();
        assert_eq!(validation_msg(e), START_AFTER_END);
        let e = f.trips.create(cand(Some("2030-06-01"), Some("2030-06-30"), 10.0, dest.id)).await.unwrap_err();
        assert_eq!(validation_msg(e), START_IN_PAST);
        let e = f.trips.create(cand(Some("2030-07-01"), None, 10.0, dest.id)).await.unwrap_err();
        assert_eq!(validation_msg(e), DATES_REQUIRED);
    }

    #[tokio::test]
    async fn create_rejects_non_positive_price() {
        let f = fixture();
        let dest = f.destinations.create(DestinationCandidate::new("Rome", "Italy")).await.unwrap();
        let err = f.trips.create(cand(Some("2030-07-01"), Some("2030-07-02"), 0.0, dest.id)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(ModelError::Validation(_))));
    }

    #[tokio::test]
    async fn update_moves_trip_between_destinations() {
        let f = fixture();
        let rome = f.destinations.create(DestinationCandidate::new("Rome", "Italy")).await.unwrap();
        let oslo = f.destinations.create(DestinationCandidate::new("Oslo", "Norway")).await.unwrap();
        let trip = f.trips.create(cand(Some("2030-07-01"), Some("2030-07-05"), 300.0, rome.id)).await.unwrap();

        let moved = f
            .trips
            .update(trip.id, cand(Some("2030-09-01"), Some("2030-09-03"), 450.5, oslo.id))
            .await
            .unwrap();
        assert_eq!(moved.id, trip.id);
        assert_eq!(moved.destination_name, "Oslo");
        assert_eq!(moved.price, 450.5);
        assert_eq!(moved.start_date, d("2030-09-01"));
        assert!(f.destinations.get(rome.id).await.unwrap().trip_ids.is_empty());
        assert_eq!(f.destinations.get(oslo.id).await.unwrap().trip_ids, vec![trip.id]);
    }

    #[tokio::test]
    async fn update_checks_trip_then_destination() {
        let f = fixture();
        let rome = f.destinations.create(DestinationCandidate::new("Rome", "Italy")).await.unwrap();
        let err = f.trips.update(77, cand(Some("2030-07-01"), Some("2030-07-05"), 1.0, 555)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Trip not found"));

        let trip = f.trips.create(cand(Some("2030-07-01"), Some("2030-07-05"), 1.0, rome.id)).await.unwrap();
        let err = f.trips.update(trip.id, cand(Some("2030-07-01"), Some("2030-07-05"), 1.0, 555)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Destination not found"));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let f = fixture();
        let rome = f.destinations.create(DestinationCandidate::new("Rome", "Italy")).await.unwrap();
        let trip = f.trips.create(cand(Some("2030-07-01"), Some("2030-07-05"), 1.0, rome.id)).await.unwrap();
        f.trips.delete(trip.id).await.unwrap();
        assert!(matches!(f.trips.get(trip.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.trips.delete(trip.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_filters_by_destination_and_sorts() {
        let f = fixture();
        let rome = f.destinations.create(DestinationCandidate::new("Rome", "Italy")).await.unwrap();
        let oslo = f.destinations.create(DestinationCandidate::new("Oslo", "Norway")).await.unwrap();
        f.trips.create(cand(Some("2030-08-01"), Some("2030-08-05"), 500.0, rome.id)).await.unwrap();
        f.trips.create(cand(Some("2030-07-01"), Some("2030-07-05"), 200.0, rome.id)).await.unwrap();
        f.trips.create(cand(Some("2030-07-15"), Some("2030-07-20"), 900.0, oslo.id)).await.unwrap();

        let all = f.trips.list(PageRequest::default(), None).await.unwrap();
        let starts: Vec<_> = all.items.iter().map(|t| t.start_date.to_string()).collect();
        assert_eq!(starts, vec!["2030-07-01", "2030-07-15", "2030-08-01"]);

        let req = PageRequest::new(Pagination::default(), Sort::desc(TripSort::Price));
        let rome_only = f.trips.list(req, Some(rome.id)).await.unwrap();
        let prices: Vec<_> = rome_only.items.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![500.0, 200.0]);
        assert_eq!(rome_only.total_items, 2);
    }
}
