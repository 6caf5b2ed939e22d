use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::{
    job_descriptor::JobDescriptor, job_logs, job_registry::JobRegistry, job_result::JobResult,
    JobContext, JobError,
};

/// Executes the payload of a fired task.
#[async_trait]
pub trait TaskRunner: Send + Sync + 'static {
    /// Checks that the job's type is known and its arguments bind to it.
    fn validate(&self, job: &JobDescriptor) -> Result<(), JobError>;

    async fn run(&self, job: Arc<JobDescriptor>);
}

/// Runs registered jobs with a timeout and records every execution.
pub struct JobRunner {
    registry: JobRegistry,
    ctx: JobContext,
    job_timeout: Duration,
}

impl JobRunner {
    pub fn new(registry: JobRegistry, ctx: JobContext) -> Self {
        let job_timeout = Duration::from_secs(ctx.config.scheduler.job_timeout_seconds);
        Self {
            registry,
            ctx,
            job_timeout,
        }
    }
}

#[async_trait]
impl TaskRunner for JobRunner {
    fn validate(&self, job: &JobDescriptor) -> Result<(), JobError> {
        self.registry.validate(&job.job_type, &job.arguments)
    }

    async fn run(&self, job: Arc<JobDescriptor>) {
        debug!("▶️  Running job {} ({})", job.key, job.job_type);

        let started_at = chrono::Utc::now().naive_utc();
        let start_time = Instant::now();

        let result = match timeout(
            self.job_timeout,
            self.registry
                .execute(&self.ctx, &job.job_type, &job.arguments),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => JobResult::TimedOut,
        };

        let elapsed = start_time.elapsed();

        match &result {
            JobResult::Completed => {
                info!(
                    "✅ Job {} '{}' completed in {}ms",
                    job.key,
                    job.name,
                    elapsed.as_millis()
                );
            }
            JobResult::Failed(e) => {
                warn!("❌ Job {} '{}' failed: {}", job.key, job.name, e);
            }
            JobResult::TimedOut => {
                warn!(
                    "⏰ Job {} '{}' timed out after {}s",
                    job.key,
                    job.name,
                    self.job_timeout.as_secs()
                );
            }
        }

        if let Err(e) =
            job_logs::record_execution(&self.ctx.db, &job, &result, started_at, elapsed).await
        {
            error!("💥 Failed to record execution of job {}: {}", job.key, e);
        }
    }
}
