use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{errors, trip};

/// Inclusive character bounds for `name` and `country`.
pub const TEXT_MIN_CHARS: usize = 2;
pub const TEXT_MAX_CHARS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "destination")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub country: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Trip }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Trip => Entity::has_many(trip::Entity).into(),
        }
    }
}

impl Related<trip::Entity> for Entity {
    fn to() -> RelationDef { Relation::Trip.def() }
}

impl ActiveModelBehavior for ActiveModel {}

fn validate_text(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} must not be blank")));
    }
    let len = value.chars().count();
    if !(TEXT_MIN_CHARS..=TEXT_MAX_CHARS).contains(&len) {
        return Err(errors::ModelError::Validation(format!(
            "{field} must be between {TEXT_MIN_CHARS} and {TEXT_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    validate_text("name", name)
}

pub fn validate_country(country: &str) -> Result<(), errors::ModelError> {
    validate_text("country", country)
}

/// Insert after field validation. Uniqueness is left to the caller and the
/// `uniq_destination_name_ci` index.
pub async fn create<C: ConnectionTrait>(db: &C, name: &str, country: &str) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_country(country)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        country: Set(country.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
