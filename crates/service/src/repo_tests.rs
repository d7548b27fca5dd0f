//! SeaORM repositories against a live database, driven through the services.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::clock::FixedClock;
use crate::destination::domain::{DestinationCandidate, DestinationSort};
use crate::destination::repo::seaorm::SeaOrmDestinationRepository;
use crate::destination::repository::DestinationRepository;
use crate::destination::DestinationService;
use crate::errors::ServiceError;
use crate::pagination::{PageRequest, Pagination, Sort};
use crate::test_support::get_db;
use crate::trip::domain::{NewTrip, TripCandidate};
use crate::trip::repo::seaorm::SeaOrmTripRepository;
use crate::trip::repository::TripRepository;
use crate::trip::TripService;

fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2030, 1, 1).unwrap() }

fn unique(prefix: &str) -> String { format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12]) }

#[tokio::test]
async fn destination_crud_and_case_insensitive_uniqueness() -> Result<(), anyhow::Error> {
    let Some(db) = get_db().await else { return Ok(()) };
    let svc = DestinationService::new(Arc::new(SeaOrmDestinationRepository::new(db)));

    let name = unique("Dest");
    let created = svc.create(DestinationCandidate::new(&name, "Testland")).await?;
    assert_eq!(svc.get(created.id).await?.name, name);

    let dup = svc.create(DestinationCandidate::new(name.to_uppercase(), "Testland")).await;
    assert!(matches!(dup, Err(ServiceError::Conflict(_))));

    let updated = svc.update(created.id, DestinationCandidate::new(name.to_lowercase(), "Otherland")).await?;
    assert_eq!(updated.country, "Otherland");

    svc.delete(created.id).await?;
    assert!(matches!(svc.get(created.id).await, Err(ServiceError::NotFound(_))));
    assert!(matches!(svc.delete(created.id).await, Err(ServiceError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn country_filter_escapes_like_wildcards() -> Result<(), anyhow::Error> {
    let Some(db) = get_db().await else { return Ok(()) };
    let svc = DestinationService::new(Arc::new(SeaOrmDestinationRepository::new(db)));

    let marker = unique("cc").to_lowercase();
    let hit = svc.create(DestinationCandidate::new(unique("A"), format!("X{}_Y", marker.to_uppercase()))).await?;
    let miss = svc.create(DestinationCandidate::new(unique("B"), format!("{}zY", marker))).await?;

    let req = PageRequest::new(Pagination { page: 1, per_page: 100 }, Sort::asc(DestinationSort::Id));
    let needle = format!("{}_y", marker);
    let page = svc.list(req, Some(needle.as_str())).await?;
    let ids: Vec<_> = page.items.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![hit.id]);

    svc.delete(hit.id).await?;
    svc.delete(miss.id).await?;
    Ok(())
}

#[tokio::test]
async fn trips_join_destination_and_cascade_on_delete() -> Result<(), anyhow::Error> {
    let Some(db) = get_db().await else { return Ok(()) };
    let dest_repo = Arc::new(SeaOrmDestinationRepository::new(db.clone()));
    let trip_repo = Arc::new(SeaOrmTripRepository::new(db));
    let destinations = DestinationService::new(dest_repo.clone());
    let trips = TripService::with_clock(trip_repo, dest_repo, Arc::new(FixedClock(today())));

    let name = unique("Trip");
    let dest = destinations.create(DestinationCandidate::new(&name, "Testland")).await?;
    let start = today().checked_add_days(Days::new(10)).unwrap();
    let end = today().checked_add_days(Days::new(12)).unwrap();
    let trip = trips
        .create(TripCandidate { start_date: Some(start), end_date: Some(end), price: 99.5, destination_id: dest.id })
        .await?;
    assert_eq!(trip.destination_name, name);
    assert_eq!(destinations.get(dest.id).await?.trip_ids, vec![trip.id]);

    let page = trips.list(PageRequest::default(), Some(dest.id)).await?;
    assert_eq!(page.total_items, 1);

    let missing = trips
        .create(TripCandidate { start_date: Some(start), end_date: Some(end), price: 1.0, destination_id: -1 })
        .await;
    assert!(matches!(missing, Err(ServiceError::NotFound(ref m)) if m == "Destination not found"));

    destinations.delete(dest.id).await?;
    assert!(matches!(trips.get(trip.id).await, Err(ServiceError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn trip_update_rewrites_row_and_moves_destination() -> Result<(), anyhow::Error> {
    let Some(db) = get_db().await else { return Ok(()) };
    let dest_repo = Arc::new(SeaOrmDestinationRepository::new(db.clone()));
    let trip_repo = Arc::new(SeaOrmTripRepository::new(db));
    let destinations = DestinationService::new(dest_repo.clone());
    let trips = TripService::with_clock(trip_repo, dest_repo, Arc::new(FixedClock(today())));

    let from = destinations.create(DestinationCandidate::new(unique("From"), "Testland")).await?;
    let to_name = unique("To");
    let to = destinations.create(DestinationCandidate::new(&to_name, "Testland")).await?;
    let start = today().checked_add_days(Days::new(3)).unwrap();
    let end = today().checked_add_days(Days::new(5)).unwrap();
    let trip = trips
        .create(TripCandidate { start_date: Some(start), end_date: Some(end), price: 10.0, destination_id: from.id })
        .await?;

    let new_end = today().checked_add_days(Days::new(9)).unwrap();
    let updated = trips
        .update(trip.id, TripCandidate { start_date: Some(start), end_date: Some(new_end), price: 42.5, destination_id: to.id })
        .await?;
    assert_eq!(updated.id, trip.id);
    assert_eq!(updated.end_date, new_end);
    assert_eq!(updated.price, 42.5);
    assert_eq!(updated.destination_name, to_name);
    assert!(destinations.get(from.id).await?.trip_ids.is_empty());
    assert_eq!(destinations.get(to.id).await?.trip_ids, vec![trip.id]);

    destinations.delete(from.id).await?;
    destinations.delete(to.id).await?;
    Ok(())
}

#[tokio::test]
async fn foreign_key_violation_on_trip_update_is_destination_not_found() -> Result<(), anyhow::Error> {
    let Some(db) = get_db().await else { return Ok(()) };
    let dest_repo = SeaOrmDestinationRepository::new(db.clone());
    let trip_repo = SeaOrmTripRepository::new(db);

    let kept = DestinationRepository::insert(&dest_repo, &DestinationCandidate::new(unique("Kept"), "Testland")).await?;
    let gone = DestinationRepository::insert(&dest_repo, &DestinationCandidate::new(unique("Gone"), "Testland")).await?;
    let start = today().checked_add_days(Days::new(1)).unwrap();
    let end = today().checked_add_days(Days::new(2)).unwrap();
    let row = NewTrip { start_date: start, end_date: end, price: 20.0, destination_id: kept.id };
    let trip = TripRepository::insert(&trip_repo, &row).await?;
    assert!(dest_repo.delete_cascade(gone.id).await?);

    // bypasses the service's existence check so the database rejects the write
    let moved = NewTrip { destination_id: gone.id, ..row };
    let err = TripRepository::update(&trip_repo, trip.id, &moved).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(ref m) if m == "Destination not found"));
    let still = TripRepository::find_by_id(&trip_repo, trip.id).await?.unwrap();
    assert_eq!(still.destination_id, kept.id);

    dest_repo.delete_cascade(kept.id).await?;
    Ok(())
}

#[tokio::test]
async fn unique_index_violation_on_insert_is_conflict() -> Result<(), anyhow::Error> {
    let Some(db) = get_db().await else { return Ok(()) };
    let repo = SeaOrmDestinationRepository::new(db);

    let name = unique("Dup");
    let first = repo.insert(&DestinationCandidate::new(&name, "Testland")).await?;
    let err = repo.insert(&DestinationCandidate::new(name.to_uppercase(), "Testland")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(ref m) if m == "Destination already exists"));

    repo.delete_cascade(first.id).await?;
    Ok(())
}
