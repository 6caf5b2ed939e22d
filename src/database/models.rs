pub mod article_tag;
pub mod job;
pub mod job_log;
pub mod job_result;
pub mod job_status;
pub mod misfire_policy;
pub mod tag;
