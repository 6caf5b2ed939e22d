use std::{collections::HashMap, sync::Arc};

use futures_util::future::BoxFuture;

use super::{job_result::JobResult, Job, JobContext, JobError};

type JobExecutor =
    Arc<dyn Fn(&JobContext, serde_json::Value) -> BoxFuture<'static, Result<(), JobError>> + Send + Sync>;

type ArgumentsCheck = fn(&serde_json::Value) -> Result<(), JobError>;

#[derive(Clone)]
struct RegisteredJob {
    executor: JobExecutor,
    check_arguments: ArgumentsCheck,
}

/// Maps the `job_type` discriminator stored with every job to its implementation.
#[derive(Clone)]
pub struct JobRegistry {
    jobs: HashMap<&'static str, RegisteredJob>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_job<J: Job + 'static>(mut self) -> Self {
        self.register_job::<J>();
        self
    }

    pub fn register_job<J: Job + 'static>(&mut self) {
        let executor: JobExecutor = Arc::new(
            |ctx: &JobContext, args_json: serde_json::Value| -> BoxFuture<'static, Result<(), JobError>> {
                let ctx = ctx.clone();
                Box::pin(async move {
                    let arguments = bind_arguments::<J>(args_json)?;
                    J::execute(&ctx, arguments).await
                })
            },
        );

        self.jobs.insert(
            J::name(),
            RegisteredJob {
                executor,
                check_arguments: check_arguments::<J>,
            },
        );
    }

    pub fn contains(&self, job_type: &str) -> bool {
        self.jobs.contains_key(job_type)
    }

    pub fn job_names(&self) -> impl Iterator<Item = &&'static str> {
        self.jobs.keys()
    }

    /// Checks that `job_type` is registered and that `arguments` bind to its
    /// argument type, without running anything.
    pub fn validate(&self, job_type: &str, arguments: &serde_json::Value) -> Result<(), JobError> {
        let job = self
            .jobs
            .get(job_type)
            .ok_or_else(|| JobError::UnknownJobType(job_type.to_string()))?;

        (job.check_arguments)(arguments)
    }

    pub(crate) async fn execute(
        &self,
        ctx: &JobContext,
        job_type: &str,
        arguments: &serde_json::Value,
    ) -> JobResult {
        let Some(job) = self.jobs.get(job_type) else {
            return JobResult::Failed(JobError::UnknownJobType(job_type.to_string()));
        };

        match (job.executor)(ctx, arguments.clone()).await {
            Ok(()) => JobResult::Completed,
            Err(e) => JobResult::Failed(e),
        }
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn bind_arguments<J: Job>(arguments: serde_json::Value) -> Result<J::Arguments, JobError> {
    serde_json::from_value(arguments).map_err(|e| JobError::InvalidArguments(e.to_string()))
}

fn check_arguments<J: Job>(arguments: &serde_json::Value) -> Result<(), JobError> {
    bind_arguments::<J>(arguments.clone()).map(drop)
}
