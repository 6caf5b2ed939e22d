pub mod builtin;
pub mod cron_expression;
pub mod engine;
pub mod job_descriptor;
pub mod job_form;
pub mod job_key;
pub mod job_logs;
pub mod job_registry;
pub mod job_result;
pub mod job_service;
pub mod job_store;
pub mod job_view;
pub mod runner;
pub mod scheduler;

use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use std::future::Future;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Invalid job arguments: {0}")]
    InvalidArguments(String),
    #[error("No job registered for job type '{0}'")]
    UnknownJobType(String),
    #[error("{0}")]
    Failed(String),
}

impl From<sea_orm::DbErr> for JobError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Failed(format!("Database error: {err}"))
    }
}

/// What a running job gets to work with.
#[derive(Clone, Debug)]
pub struct JobContext {
    pub config: Config,
    pub db: DatabaseConnection,
}

/// An invocable job, addressed by its `name()` from the `job_type` column.
pub trait Job: Send + Sync {
    type Arguments: DeserializeOwned + Send + Sync;

    fn execute(
        ctx: &JobContext,
        arguments: Self::Arguments,
    ) -> impl Future<Output = Result<(), JobError>> + Send;

    fn name() -> &'static str;
}
