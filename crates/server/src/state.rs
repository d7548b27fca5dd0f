use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::clock::{Clock, SystemClock};
use service::destination::{
    repo::seaorm::SeaOrmDestinationRepository, repository::DestinationRepository, DestinationService,
};
use service::mock::MockTravelStore;
use service::trip::{repo::seaorm::SeaOrmTripRepository, repository::TripRepository, TripService};

pub type Destinations = DestinationService<dyn DestinationRepository>;
pub type Trips = TripService<dyn TripRepository, dyn DestinationRepository>;

/// Shared handler state. Services are type-erased so the same router runs
/// over SeaORM or the in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub destinations: Arc<Destinations>,
    pub trips: Arc<Trips>,
}

impl AppState {
    pub fn new(
        destinations: Arc<dyn DestinationRepository>,
        trips: Arc<dyn TripRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            destinations: Arc::new(DestinationService::new(Arc::clone(&destinations))),
            trips: Arc::new(TripService::with_clock(trips, destinations, clock)),
        }
    }

    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(SeaOrmDestinationRepository::new(db.clone())),
            Arc::new(SeaOrmTripRepository::new(db)),
            Arc::new(SystemClock),
        )
    }

    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(MockTravelStore::default());
        Self::new(store.clone(), store, clock)
    }
}
