//! In-memory store implementing both repository ports, for tests, doc
//! examples and running the router without a database.
//!
//! It mirrors the database rules the services rely on: the case-insensitive
//! unique destination name, the trip -> destination foreign key and the cascade.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;
use models::{destination, trip};

use crate::destination::domain::{same_name, Destination, DestinationCandidate, DestinationSort};
use crate::destination::repository::DestinationRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest, Pagination, Sort, SortDirection};
use crate::trip::domain::{NewTrip, Trip, TripSort};
use crate::trip::repository::TripRepository;

#[derive(Default)]
struct State {
    destinations: BTreeMap<i64, destination::Model>,
    trips: BTreeMap<i64, trip::Model>,
    last_destination_id: i64,
    last_trip_id: i64,
}

impl State {
    fn destination_view(&self, m: &destination::Model) -> Destination {
        let trip_ids = self.trips.values().filter(|t| t.destination_id == m.id).map(|t| t.id).collect();
        Destination { id: m.id, name: m.name.clone(), country: m.country.clone(), trip_ids }
    }

    fn trip_view(&self, t: &trip::Model) -> Trip {
        Trip {
            id: t.id,
            start_date: t.start_date,
            end_date: t.end_date,
            price: t.price,
            destination_id: t.destination_id,
            destination_name: self.destinations.get(&t.destination_id).map(|d| d.name.clone()).unwrap_or_default(),
        }
    }

    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.destinations.values().any(|d| Some(d.id) != except && same_name(&d.name, name))
    }
}

#[derive(Default)]
pub struct MockTravelStore {
    state: Mutex<State>,
}

impl MockTravelStore {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a trip directly, bypassing date rules. Returns the new id.
    pub fn seed_trip(&self, destination_id: i64, start_date: NaiveDate, end_date: NaiveDate, price: f64) -> i64 {
        let mut st = self.state();
        st.last_trip_id += 1;
        let id = st.last_trip_id;
        st.trips.insert(id, trip::Model { id, start_date, end_date, price, destination_id });
        id
    }

    pub fn has_trip(&self, id: i64) -> bool {
        self.state().trips.contains_key(&id)
    }
}

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

fn slice<T>(sorted: Vec<T>, pagination: Pagination) -> (Vec<T>, u64) {
    let total = sorted.len() as u64;
    let (_, per_page) = pagination.normalize();
    let items = sorted
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(per_page as usize)
        .collect();
    (items, total)
}

fn cmp_destination(a: &destination::Model, b: &destination::Model, sort: Sort<DestinationSort>) -> Ordering {
    let primary = match sort.field {
        DestinationSort::Id => a.id.cmp(&b.id),
        DestinationSort::Name => a.name.cmp(&b.name),
        DestinationSort::Country => a.country.cmp(&b.country),
    };
    directed(primary, sort.direction).then(a.id.cmp(&b.id))
}

fn cmp_trip(a: &trip::Model, b: &trip::Model, sort: Sort<TripSort>) -> Ordering {
    let primary = match sort.field {
        TripSort::Id => a.id.cmp(&b.id),
        TripSort::StartDate => a.start_date.cmp(&b.start_date),
        TripSort::EndDate => a.end_date.cmp(&b.end_date),
        TripSort::Price => a.price.total_cmp(&b.price),
    };
    directed(primary, sort.direction).then(a.id.cmp(&b.id))
}

#[async_trait]
impl DestinationRepository for MockTravelStore {
    async fn list(&self, country: Option<&str>, req: &PageRequest<DestinationSort>) -> Result<Page<Destination>, ServiceError> {
        let st = self.state();
        let needle = country.map(str::to_lowercase);
        let mut rows: Vec<&destination::Model> = st
            .destinations
            .values()
            .filter(|d| needle.as_deref().map_or(true, |n| d.country.to_lowercase().contains(n)))
            .collect();
        rows.sort_by(|a, b| cmp_destination(a, b, req.sort));
        let (rows, total) = slice(rows, req.pagination);
        let items = rows.into_iter().map(|m| st.destination_view(m)).collect();
        Ok(Page::new(items, req.pagination, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Destination>, ServiceError> {
        let st = self.state();
        Ok(st.destinations.get(&id).map(|m| st.destination_view(m)))
    }

    async fn exists(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.state().destinations.contains_key(&id))
    }

    async fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, ServiceError> {
        Ok(self.state().name_taken(name, None))
    }

    async fn insert(&self, candidate: &DestinationCandidate) -> Result<Destination, ServiceError> {
        destination::validate_name(&candidate.name)?;
        destination::validate_country(&candidate.country)?;
        let mut st = self.state();
        if st.name_taken(&candidate.name, None) {
            return Err(ServiceError::already_exists("Destination"));
        }
        st.last_destination_id += 1;
        let id = st.last_destination_id;
        let model = destination::Model { id, name: candidate.name.clone(), country: candidate.country.clone() };
        st.destinations.insert(id, model.clone());
        Ok(st.destination_view(&model))
    }

    async fn update(&self, id: i64, candidate: &DestinationCandidate) -> Result<Destination, ServiceError> {
        destination::validate_name(&candidate.name)?;
        destination::validate_country(&candidate.country)?;
        let mut st = self.state();
        if !st.destinations.contains_key(&id) {
            return Err(ServiceError::not_found("Destination"));
        }
        if st.name_taken(&candidate.name, Some(id)) {
            return Err(ServiceError::already_exists("Destination"));
        }
        let model = destination::Model { id, name: candidate.name.clone(), country: candidate.country.clone() };
        st.destinations.insert(id, model.clone());
        Ok(st.destination_view(&model))
    }

    async fn delete_cascade(&self, id: i64) -> Result<bool, ServiceError> {
        let mut st = self.state();
        if st.destinations.remove(&id).is_none() {
            return Ok(false);
        }
        st.trips.retain(|_, t| t.destination_id != id);
        Ok(true)
    }
}

#[async_trait]
impl TripRepository for MockTravelStore {
    async fn list(&self, destination_id: Option<i64>, req: &PageRequest<TripSort>) -> Result<Page<Trip>, ServiceError> {
        let st = self.state();
        let mut rows: Vec<&trip::Model> = st
            .trips
            .values()
            .filter(|t| destination_id.map_or(true, |id| t.destination_id == id))
            .collect();
        rows.sort_by(|a, b| cmp_trip(a, b, req.sort));
        let (rows, total) = slice(rows, req.pagination);
        let items = rows.into_iter().map(|t| st.trip_view(t)).collect();
        Ok(Page::new(items, req.pagination, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Trip>, ServiceError> {
        let st = self.state();
        Ok(st.trips.get(&id).map(|t| st.trip_view(t)))
    }

    async fn insert(&self, row: &NewTrip) -> Result<Trip, ServiceError> {
        trip::validate_price(row.price)?;
        let mut st = self.state();
        if !st.destinations.contains_key(&row.destination_id) {
            return Err(ServiceError::not_found("Destination"));
        }
        st.last_trip_id += 1;
        let id = st.last_trip_id;
        let model = trip::Model {
            id,
            start_date: row.start_date,
            end_date: row.end_date,
            price: row.price,
            destination_id: row.destination_id,
        };
        st.trips.insert(id, model.clone());
        Ok(st.trip_view(&model))
    }

    async fn update(&self, id: i64, row: &NewTrip) -> Result<Trip, ServiceError> {
        trip::validate_price(row.price)?;
        let mut st = self.state();
        if !st.trips.contains_key(&id) {
            return Err(ServiceError::not_found("Trip"));
        }
        if !st.destinations.contains_key(&row.destination_id) {
            return Err(ServiceError::not_found("Destination"));
        }
        let model = trip::Model {
            id,
            start_date: row.start_date,
            end_date: row.end_date,
            price: row.price,
            destination_id: row.destination_id,
        };
        st.trips.insert(id, model.clone());
        Ok(st.trip_view(&model))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.state().trips.remove(&id).is_some())
    }
}
