//! Execution history kept in `sched_job_log`.

use std::time::Duration;

use chrono::NaiveDateTime;
use sea_orm::{prelude::*, ActiveValue::Set, QueryOrder, QuerySelect};

use crate::{
    database::models::{job_log, job_result::JobResult as StoredJobResult},
    page::{PageQuery, ResultPage},
};

use super::{job_descriptor::JobDescriptor, job_result::JobResult, job_view::JobLogView};

pub async fn record_execution<C: ConnectionTrait>(
    db: &C,
    job: &JobDescriptor,
    result: &JobResult,
    started_at: NaiveDateTime,
    elapsed: Duration,
) -> Result<(), DbErr> {
    let finished_at = started_at + chrono::Duration::from_std(elapsed).unwrap_or_default();

    job_log::ActiveModel {
        id: Set(Uuid::new_v4()),
        job_id: Set(job.key.id),
        job_name: Set(job.name.clone()),
        job_group: Set(job.key.group.clone()),
        job_type: Set(job.job_type.clone()),
        result: Set(StoredJobResult::from(result)),
        failure_reason: Set(result.failure_reason()),
        started_at: Set(started_at),
        finished_at: Set(finished_at),
        execution_time_ms: Set(i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)),
        created_at: Set(finished_at),
    }
    .insert(db)
    .await?;

    Ok(())
}

/// Deletes every log written before `cutoff`. Returns how many were removed.
pub async fn purge_before<C: ConnectionTrait>(db: &C, cutoff: NaiveDateTime) -> Result<u64, DbErr> {
    let result = job_log::Entity::delete_many()
        .filter(job_log::Column::CreatedAt.lt(cutoff))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Most recent runs of one job first.
pub async fn list_logs(
    db: &DatabaseConnection,
    job_id: i32,
    page: PageQuery,
) -> Result<ResultPage<JobLogView>, DbErr> {
    let query = job_log::Entity::find().filter(job_log::Column::JobId.eq(job_id));

    let (total, logs) = tokio::try_join!(
        query.clone().count(db),
        query
            .order_by_desc(job_log::Column::StartedAt)
            .limit(page.limit())
            .offset(page.offset())
            .all(db),
    )?;

    Ok(ResultPage::new(logs, total).map(JobLogView::from))
}
