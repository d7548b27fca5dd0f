use async_trait::async_trait;
use models::{destination, trip};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::destination::repo::seaorm::order_of;
use crate::errors::{map_model_err, map_write_err, ServiceError};
use crate::pagination::{Page, PageRequest};
use crate::trip::domain::{NewTrip, Trip, TripSort};
use crate::trip::repository::TripRepository;

pub struct SeaOrmTripRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmTripRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Fetch a row that must exist, e.g. right after writing it.
    async fn load(&self, id: i64) -> Result<Trip, ServiceError> {
        self.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Trip"))
    }
}

fn to_domain(t: trip::Model, d: Option<destination::Model>) -> Trip {
    Trip {
        id: t.id,
        start_date: t.start_date,
        end_date: t.end_date,
        price: t.price,
        destination_id: t.destination_id,
        // FK guarantees the join; an empty name only appears mid-cascade.
        destination_name: d.map(|d| d.name).unwrap_or_default(),
    }
}

fn sort_column(field: TripSort) -> trip::Column {
    match field {
        TripSort::Id => trip::Column::Id,
        TripSort::StartDate => trip::Column::StartDate,
        TripSort::EndDate => trip::Column::EndDate,
        TripSort::Price => trip::Column::Price,
    }
}

#[async_trait]
impl TripRepository for SeaOrmTripRepository {
    async fn list(&self, destination_id: Option<i64>, req: &PageRequest<TripSort>) -> Result<Page<Trip>, ServiceError> {
        let mut query = trip::Entity::find();
        if let Some(id) = destination_id {
            query = query.filter(trip::Column::DestinationId.eq(id));
        }
        let query = query
            .order_by(sort_column(req.sort.field), order_of(req.sort.direction))
            .order_by_asc(trip::Column::Id)
            .find_also_related(destination::Entity);

        let (idx, per_page) = req.pagination.normalize();
        let paginator = query.paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(idx).await?;
        let items = rows.into_iter().map(|(t, d)| to_domain(t, d)).collect();
        Ok(Page::new(items, req.pagination, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Trip>, ServiceError> {
        let row = trip::Entity::find_by_id(id)
            .find_also_related(destination::Entity)
            .one(&self.db)
            .await?;
        Ok(row.map(|(t, d)| to_domain(t, d)))
    }

    async fn insert(&self, row: &NewTrip) -> Result<Trip, ServiceError> {
        let created = trip::create(&self.db, row.start_date, row.end_date, row.price, row.destination_id)
            .await
            .map_err(map_model_err)?;
        self.load(created.id).await
    }

    async fn update(&self, id: i64, row: &NewTrip) -> Result<Trip, ServiceError> {
        trip::validate_price(row.price)?;
        let existing = trip::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Trip"))?;
        let mut am: trip::ActiveModel = existing.into();
        am.start_date = Set(row.start_date);
        am.end_date = Set(row.end_date);
        am.price = Set(row.price);
        am.destination_id = Set(row.destination_id);
        am.update(&self.db).await.map_err(map_write_err)?;
        self.load(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = trip::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
