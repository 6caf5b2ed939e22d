use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::database::models::{
    job, job_log, job_result::JobResult, job_status::JobStatus, misfire_policy::MisfirePolicy,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JobView {
    pub id: i32,
    pub job_name: String,
    pub job_group: String,
    pub job_type: String,
    pub arguments: Option<serde_json::Value>,
    pub cron_expression: String,
    pub misfire_policy: MisfirePolicy,
    pub concurrent: bool,
    pub status: JobStatus,
    pub remark: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Only computed for single-job lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_valid_time: Option<DateTime<Utc>>,
}

impl From<job::Model> for JobView {
    fn from(job: job::Model) -> Self {
        // Rows written by this service always hold valid JSON; anything else
        // is shown as a plain string rather than hidden.
        let arguments = job.arguments.map(|raw| {
            serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
        });

        Self {
            id: job.id,
            job_name: job.job_name,
            job_group: job.job_group,
            job_type: job.job_type,
            arguments,
            cron_expression: job.cron_expression,
            misfire_policy: job.misfire_policy,
            concurrent: job.concurrent,
            status: job.status,
            remark: job.remark,
            created_at: job.created_at,
            updated_at: job.updated_at,
            next_valid_time: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JobLogView {
    pub id: uuid::Uuid,
    pub job_id: i32,
    pub job_name: String,
    pub job_group: String,
    pub job_type: String,
    pub result: JobResult,
    pub failure_reason: Option<String>,
    pub started_at: NaiveDateTime,
    pub finished_at: NaiveDateTime,
    pub execution_time_ms: i64,
}

impl From<job_log::Model> for JobLogView {
    fn from(log: job_log::Model) -> Self {
        Self {
            id: log.id,
            job_id: log.job_id,
            job_name: log.job_name,
            job_group: log.job_group,
            job_type: log.job_type,
            result: log.result,
            failure_reason: log.failure_reason,
            started_at: log.started_at,
            finished_at: log.finished_at,
            execution_time_ms: log.execution_time_ms,
        }
    }
}
