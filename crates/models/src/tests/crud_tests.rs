use super::test_db;
use crate::{destination, trip};
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};

fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}-{nanos}")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_destination_crud() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };

    let name = unique_name("crud-dest");
    let created = destination::create(&db, &name, "Portugal").await?;
    assert_eq!(created.name, name);
    assert!(created.id > 0);

    let found = destination::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref().map(|d| d.country.as_str()), Some("Portugal"));

    let by_name = destination::Entity::find()
        .filter(destination::Column::Name.eq(name.clone()))
        .one(&db)
        .await?;
    assert_eq!(by_name.map(|d| d.id), Some(created.id));

    destination::Entity::delete_by_id(created.id).exec(&db).await?;
    assert!(destination::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_destination_name_unique_ignoring_case() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };

    let name = unique_name("Unique-Dest");
    let first = destination::create(&db, &name, "Chile").await?;
    let dup = destination::create(&db, &name.to_uppercase(), "Chile").await;
    assert!(matches!(dup, Err(crate::errors::ModelError::Db(_))));

    destination::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_trip_fk_cascade() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };

    let dest = destination::create(&db, &unique_name("cascade-dest"), "Japan").await?;
    let t = trip::create(&db, date(2031, 4, 1), date(2031, 4, 9), 1450.0, dest.id).await?;

    let (found, parent) = trip::Entity::find_by_id(t.id)
        .find_also_related(destination::Entity)
        .one(&db)
        .await?
        .expect("trip exists");
    assert_eq!(found.destination_id, dest.id);
    assert_eq!(parent.map(|d| d.name), Some(dest.name.clone()));

    destination::Entity::delete_by_id(dest.id).exec(&db).await?;
    assert!(trip::Entity::find_by_id(t.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_trip_requires_existing_destination() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };

    let res = trip::create(&db, date(2031, 1, 1), date(2031, 1, 2), 10.0, i64::MAX).await;
    assert!(res.is_err());
    Ok(())
}

#[tokio::test]
async fn test_transaction_rollback_discards_insert() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };

    let name = unique_name("rollback-dest");
    let txn = db.begin().await?;
    let created = destination::create(&txn, &name, "Peru").await?;
    txn.rollback().await?;

    assert!(destination::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}
