use serde::Deserialize;
use validator::Validate;

use crate::{
    database::models::{job_status::JobStatus, misfire_policy::MisfirePolicy},
    page::PageQuery,
};

/// Fields an administrator submits to create or edit a job.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JobForm {
    #[validate(length(min = 1, max = 64))]
    pub job_name: String,
    #[validate(length(min = 1, max = 64))]
    pub job_group: String,
    #[validate(length(min = 1, max = 64))]
    pub job_type: String,
    #[serde(default)]
    pub arguments: Option<serde_json::Value>,
    #[validate(length(min = 1, max = 255))]
    pub cron_expression: String,
    #[serde(default)]
    pub misfire_policy: MisfirePolicy,
    #[serde(default)]
    pub concurrent: bool,
    /// Keeps the current status on update, `Normal` on create
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[validate(length(max = 500))]
    pub remark: Option<String>,
}

impl JobForm {
    /// Arguments as stored in the `arguments` column.
    pub fn arguments_text(&self) -> Option<String> {
        self.arguments
            .as_ref()
            .filter(|value| !value.is_null())
            .map(ToString::to_string)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusForm {
    pub id: i32,
    pub status: JobStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobRunForm {
    pub id: i32,
    pub job_group: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobIds {
    pub ids: Vec<i32>,
}

/// Filter and page for the job listing. Every filter is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSearch {
    pub job_name: Option<String>,
    pub job_group: Option<String>,
    pub status: Option<JobStatus>,
    pub current: Option<u64>,
    pub size: Option<u64>,
}

impl JobSearch {
    pub fn page(&self) -> PageQuery {
        let defaults = PageQuery::default();
        PageQuery::new(
            self.current.unwrap_or(defaults.current),
            self.size.unwrap_or(defaults.size),
        )
    }
}
