//! Request extractors that reject with the problem object instead of axum's
//! plain-text bodies.

use std::collections::BTreeMap;

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use models::errors::ModelError;
use serde::de::DeserializeOwned;

use crate::errors::ApiError;

pub type FieldErrors = BTreeMap<String, String>;

/// Field-level checks run on a request body before it reaches a service.
pub trait Validate {
    /// Collect every failing field.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Record the first failure for `field`.
pub fn check(errors: &mut FieldErrors, field: &str, result: Result<(), ModelError>) {
    if let Err(e) = result {
        let msg = match e {
            ModelError::Validation(m) => m,
            other => other.to_string(),
        };
        errors.entry(field.to_string()).or_insert(msg);
    }
}

pub fn require<T>(errors: &mut FieldErrors, field: &str, value: &Option<T>) {
    if value.is_none() {
        errors.entry(field.to_string()).or_insert_with(|| format!("{field} must not be null"));
    }
}

pub fn into_result(errors: FieldErrors) -> Result<(), FieldErrors> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// JSON body deserialized, then checked with [`Validate`].
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate().map_err(ApiError::fields)?;
        Ok(Self(value))
    }
}

pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

pub struct ApiPath<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
