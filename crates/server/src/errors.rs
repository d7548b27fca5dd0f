use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use serde::Serialize;
use service::errors::ServiceError;
use tracing::{error, warn};

const INTERNAL_DETAIL: &str = "An unexpected error occurred. Please try again later.";

/// Problem object returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ApiError {
    pub title: String,
    pub detail: String,
    pub status: u16,
    /// Per-field messages, only for request validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, title: &str, detail: impl Into<String>) -> Self {
        Self { title: title.to_string(), detail: detail.into(), status: status.as_u16(), errors: None }
    }

    pub fn fields(errors: BTreeMap<String, String>) -> Self {
        warn!(fields = ?errors.keys().collect::<Vec<_>>(), "request failed field validation");
        Self {
            errors: Some(errors),
            ..Self::new(StatusCode::BAD_REQUEST, "Validation errors", "One or more fields are invalid")
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        warn!(%detail, "malformed request");
        Self::new(StatusCode::BAD_REQUEST, "Malformed request", detail)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", INTERNAL_DETAIL)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut res = (status, Json(self)).into_response();
        res.headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/problem+json"));
        res
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(detail) => {
                warn!(%detail, "entity not found");
                Self::new(StatusCode::NOT_FOUND, "Entity not found", detail)
            }
            ServiceError::Conflict(detail) => {
                warn!(%detail, "duplicate entity");
                Self::new(StatusCode::CONFLICT, "Duplicate entity", detail)
            }
            ServiceError::Validation(detail) | ServiceError::Model(ModelError::Validation(detail)) => {
                warn!(%detail, "business validation failed");
                Self::new(StatusCode::BAD_REQUEST, "Validation error", detail)
            }
            other => {
                error!(error = %other, "unexpected failure while serving request");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self { Self::malformed(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self { Self::malformed(r.body_text()) }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self { Self::malformed(r.body_text()) }
}
