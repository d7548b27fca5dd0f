use sea_orm::{entity::prelude::*, sea_query::ForeignKeyAction, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{destination, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trip")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_date: Date,
    pub end_date: Date,
    pub price: f64,
    pub destination_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Destination }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Destination => Entity::belongs_to(destination::Entity)
                .from(Column::DestinationId)
                .to(destination::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<destination::Entity> for Entity {
    fn to() -> RelationDef { Relation::Destination.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_price(price: f64) -> Result<(), errors::ModelError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(errors::ModelError::Validation("price must be greater than 0".into()));
    }
    Ok(())
}

/// Insert a trip row. Date rules are enforced by the service layer.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    start_date: Date,
    end_date: Date,
    price: f64,
    destination_id: i64,
) -> Result<Model, errors::ModelError> {
    validate_price(price)?;
    let am = ActiveModel {
        start_date: Set(start_date),
        end_date: Set(end_date),
        price: Set(price),
        destination_id: Set(destination_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
