use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Typed outcome of every service operation.
///
/// `Validation`, `NotFound` and `Conflict` carry the message shown to API
/// clients verbatim; `Db` and `Model` are unexpected failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn already_exists(entity: &str) -> Self { Self::Conflict(format!("{} already exists", entity)) }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { Self::Db(e.to_string()) }
}

/// Translate a failed insert/update into the domain error it stands for.
///
/// The only unique index is on the lowered destination name and the only
/// foreign key is trip -> destination.
pub(crate) fn map_write_err(e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::already_exists("Destination"),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::not_found("Destination"),
        _ => ServiceError::Db(e.to_string()),
    }
}

pub(crate) fn map_model_err(e: ModelError) -> ServiceError {
    match e {
        ModelError::Db(db) => map_write_err(db),
        other => ServiceError::Model(other),
    }
}
