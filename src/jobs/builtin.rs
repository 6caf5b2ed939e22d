//! Jobs that ship with the backend itself.

use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::info;

use super::{job_logs, job_registry::JobRegistry, Job, JobContext, JobError};

/// Registry with every built-in job registered.
#[must_use]
pub fn builtin_registry() -> JobRegistry {
    JobRegistry::new()
        .with_job::<HeartbeatJob>()
        .with_job::<PurgeJobLogsJob>()
}

/// Logs a line, handy to check that scheduling works end to end.
pub struct HeartbeatJob;

#[derive(Debug, Deserialize)]
pub struct HeartbeatArguments {
    pub message: String,
}

impl Job for HeartbeatJob {
    type Arguments = Option<HeartbeatArguments>;

    async fn execute(_ctx: &JobContext, arguments: Self::Arguments) -> Result<(), JobError> {
        match arguments {
            Some(HeartbeatArguments { message }) => info!("💓 Heartbeat: {}", message),
            None => info!("💓 Heartbeat"),
        }
        Ok(())
    }

    fn name() -> &'static str {
        "heartbeat"
    }
}

/// Deletes execution logs older than the retention period.
pub struct PurgeJobLogsJob;

#[derive(Debug, Deserialize)]
pub struct PurgeJobLogsArguments {
    pub retention_days: u32,
}

impl Job for PurgeJobLogsJob {
    type Arguments = PurgeJobLogsArguments;

    async fn execute(ctx: &JobContext, arguments: Self::Arguments) -> Result<(), JobError> {
        let cutoff = Utc::now().naive_utc() - Duration::days(arguments.retention_days.into());
        let deleted = job_logs::purge_before(&ctx.db, cutoff).await?;

        info!(
            "🧹 Purged {} job log(s) older than {} day(s)",
            deleted, arguments.retention_days
        );
        Ok(())
    }

    fn name() -> &'static str {
        "purge_job_logs"
    }
}
