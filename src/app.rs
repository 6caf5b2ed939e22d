use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::FromRef;
use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::{config::Config, environment::Environment, jobs::job_service::JobService};

/// Shared state handed to every handler.
#[derive(Clone, FromRef)]
pub struct App {
    pub config: Config,
    pub environment: Environment,
    pub db: DatabaseConnection,
    pub jobs: JobService,
}

#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("Database connection error")]
    DatabaseError(#[from] sea_orm::DbErr),
}

impl IntoResponse for ReadinessError {
    fn into_response(self) -> Response {
        (StatusCode::SERVICE_UNAVAILABLE, self.to_string()).into_response()
    }
}
