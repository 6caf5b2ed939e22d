use serde::Serialize;
use thiserror::Error;

use super::{job_descriptor::JobDescriptor, job_key::JobKey};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Cron expression '{expression}' of job {key} cannot be scheduled: {reason}")]
    InvalidCron {
        key: JobKey,
        expression: String,
        reason: String,
    },
    #[error("Job {key} cannot be set up: {reason}")]
    TaskSetup { key: JobKey, reason: String },
    #[error("Job {0} is not registered with the scheduler")]
    NotRegistered(JobKey),
    #[error("Scheduler engine error: {0}")]
    Engine(String),
}

/// Run state of a live task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Normal,
    Paused,
}

/// The live, in-memory scheduler every registered job runs on.
///
/// Tasks are addressed by [`JobKey`] only. Implementations are shared by the
/// whole process and must be safe to call concurrently for different keys.
pub trait Scheduler: Send + Sync {
    /// Registers a task for the job, replacing any task already registered
    /// under the same key. A paused job is registered suspended.
    fn create_schedule_job(&self, job: &JobDescriptor) -> Result<(), SchedulerError>;

    fn check_exists(&self, key: &JobKey) -> bool;

    /// Removes the task. Returns `false` when nothing was registered.
    fn delete_job(&self, key: &JobKey) -> Result<bool, SchedulerError>;

    fn pause_job(&self, key: &JobKey) -> Result<(), SchedulerError>;

    fn resume_job(&self, key: &JobKey) -> Result<(), SchedulerError>;

    /// Runs the task once right away. Its schedule is left untouched.
    fn trigger_job(&self, key: &JobKey) -> Result<(), SchedulerError>;

    /// Removes every task.
    fn clear(&self) -> Result<(), SchedulerError>;

    fn task_state(&self, key: &JobKey) -> Option<TaskState>;

    fn job_keys(&self) -> Vec<JobKey>;
}
