pub mod auth;
pub mod health_checks;
pub mod jobs;
pub mod json_error;
pub mod tags;
pub mod validated_json;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{
    jobs::job_service::JobServiceError,
    tags::TagError,
};

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Error returned by every handler, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Internal(reason) => {
                error!("💥 Request failed: {}", reason);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}

impl From<JobServiceError> for ApiError {
    fn from(err: JobServiceError) -> Self {
        match err {
            JobServiceError::InvalidCron(_) => Self::BadRequest(err.to_string()),
            JobServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            JobServiceError::Scheduler(_) | JobServiceError::Database(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl From<TagError> for ApiError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::NotFound(_) => Self::NotFound(err.to_string()),
            TagError::DuplicateName(_) | TagError::InUse(_) => Self::Conflict(err.to_string()),
            TagError::Database(_) => Self::Internal(err.to_string()),
        }
    }
}
