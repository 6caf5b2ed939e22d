use crate::database::models::{job, job_status::JobStatus, misfire_policy::MisfirePolicy};

use super::{job_key::JobKey, scheduler::SchedulerError};

/// Everything the scheduler needs to register a job, derived from its row.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDescriptor {
    pub key: JobKey,
    pub name: String,
    pub job_type: String,
    pub arguments: serde_json::Value,
    pub cron_expression: String,
    pub misfire_policy: MisfirePolicy,
    pub concurrent: bool,
    pub status: JobStatus,
}

impl TryFrom<&job::Model> for JobDescriptor {
    type Error = SchedulerError;

    fn try_from(job: &job::Model) -> Result<Self, Self::Error> {
        let key = JobKey::from(job);

        let arguments = match job.arguments.as_deref().map(str::trim) {
            None | Some("") => serde_json::Value::Null,
            Some(raw) => serde_json::from_str(raw).map_err(|e| SchedulerError::TaskSetup {
                key: key.clone(),
                reason: format!("arguments are not valid JSON: {e}"),
            })?,
        };

        Ok(Self {
            key,
            name: job.job_name.clone(),
            job_type: job.job_type.clone(),
            arguments,
            cron_expression: job.cron_expression.clone(),
            misfire_policy: job.misfire_policy,
            concurrent: job.concurrent,
            status: job.status,
        })
    }
}
