use std::fmt::{Display, Formatter, Result};

use crate::database::models::job_result::JobResult as StoredJobResult;
use crate::jobs::JobError;

/// Outcome of a single job run.
#[derive(Debug)]
pub enum JobResult {
    Completed,
    Failed(JobError),
    TimedOut,
}

impl JobResult {
    /// Human readable reason for an unsuccessful run.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Completed => None,
            Self::Failed(e) => Some(e.to_string()),
            Self::TimedOut => Some("Job exceeded its execution timeout".to_string()),
        }
    }
}

impl Display for JobResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Failed(e) => write!(f, "error: {e}"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

impl From<&JobResult> for StoredJobResult {
    fn from(result: &JobResult) -> Self {
        match result {
            JobResult::Completed => Self::Completed,
            JobResult::Failed(_) => Self::Failed,
            JobResult::TimedOut => Self::TimedOut,
        }
    }
}
