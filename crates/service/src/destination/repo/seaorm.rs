use std::collections::HashMap;

use async_trait::async_trait;
use models::{destination, trip};
use sea_orm::sea_query::{Expr, Func, LikeExpr, Order};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::destination::domain::{Destination, DestinationCandidate, DestinationSort};
use crate::destination::repository::DestinationRepository;
use crate::errors::{map_model_err, map_write_err, ServiceError};
use crate::pagination::{Page, PageRequest, SortDirection};

pub struct SeaOrmDestinationRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmDestinationRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Trip ids per destination, each list ascending.
    async fn trip_ids_for(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<i64>>, ServiceError> {
        let mut out: HashMap<i64, Vec<i64>> = HashMap::new();
        if ids.is_empty() {
            return Ok(out);
        }
        let rows: Vec<(i64, i64)> = trip::Entity::find()
            .select_only()
            .column(trip::Column::DestinationId)
            .column(trip::Column::Id)
            .filter(trip::Column::DestinationId.is_in(ids.iter().copied()))
            .order_by_asc(trip::Column::Id)
            .into_tuple()
            .all(&self.db)
            .await?;
        for (destination_id, trip_id) in rows {
            out.entry(destination_id).or_default().push(trip_id);
        }
        Ok(out)
    }

    async fn with_trips(&self, model: destination::Model) -> Result<Destination, ServiceError> {
        let mut ids = self.trip_ids_for(&[model.id]).await?;
        let trip_ids = ids.remove(&model.id).unwrap_or_default();
        Ok(to_domain(model, trip_ids))
    }
}

fn to_domain(m: destination::Model, trip_ids: Vec<i64>) -> Destination {
    Destination { id: m.id, name: m.name, country: m.country, trip_ids }
}

fn sort_column(field: DestinationSort) -> destination::Column {
    match field {
        DestinationSort::Id => destination::Column::Id,
        DestinationSort::Name => destination::Column::Name,
        DestinationSort::Country => destination::Column::Country,
    }
}

pub(crate) fn order_of(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// `%needle%` with LIKE metacharacters escaped by backslash.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

#[async_trait]
impl DestinationRepository for SeaOrmDestinationRepository {
    async fn list(&self, country: Option<&str>, req: &PageRequest<DestinationSort>) -> Result<Page<Destination>, ServiceError> {
        let mut query = destination::Entity::find();
        if let Some(country) = country {
            let pattern = contains_pattern(&country.to_lowercase());
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(destination::Column::Country)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }
        let query = query
            .order_by(sort_column(req.sort.field), order_of(req.sort.direction))
            .order_by_asc(destination::Column::Id);

        let (idx, per_page) = req.pagination.normalize();
        let paginator = query.paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(idx).await?;

        let ids: Vec<i64> = rows.iter().map(|m| m.id).collect();
        let mut trips = self.trip_ids_for(&ids).await?;
        let items = rows
            .into_iter()
            .map(|m| {
                let trip_ids = trips.remove(&m.id).unwrap_or_default();
                to_domain(m, trip_ids)
            })
            .collect();
        Ok(Page::new(items, req.pagination, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Destination>, ServiceError> {
        match destination::Entity::find_by_id(id).one(&self.db).await? {
            Some(m) => Ok(Some(self.with_trips(m).await?)),
            None => Ok(None),
        }
    }

    async fn exists(&self, id: i64) -> Result<bool, ServiceError> {
        let n = destination::Entity::find()
            .filter(destination::Column::Id.eq(id))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, ServiceError> {
        let n = destination::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(destination::Column::Name))).eq(name.to_lowercase()))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn insert(&self, candidate: &DestinationCandidate) -> Result<Destination, ServiceError> {
        let created = destination::create(&self.db, &candidate.name, &candidate.country)
            .await
            .map_err(map_model_err)?;
        Ok(to_domain(created, Vec::new()))
    }

    async fn update(&self, id: i64, candidate: &DestinationCandidate) -> Result<Destination, ServiceError> {
        destination::validate_name(&candidate.name)?;
        destination::validate_country(&candidate.country)?;
        let existing = destination::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Destination"))?;
        let mut am: destination::ActiveModel = existing.into();
        am.name = Set(candidate.name.clone());
        am.country = Set(candidate.country.clone());
        let saved = am.update(&self.db).await.map_err(map_write_err)?;
        self.with_trips(saved).await
    }

    async fn delete_cascade(&self, id: i64) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;
        trip::Entity::delete_many()
            .filter(trip::Column::DestinationId.eq(id))
            .exec(&txn)
            .await?;
        let res = destination::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }
        txn.commit().await?;
        Ok(true)
    }
}
