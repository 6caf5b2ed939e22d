//! Persistence of job definitions in `sched_job`.
//!
//! Every function takes any [`ConnectionTrait`] so the service can run them
//! inside the transaction that also covers the scheduler call.

use chrono::Utc;
use sea_orm::{
    prelude::*, ActiveValue::Set, Condition, QueryOrder, QuerySelect, Select,
};

use crate::database::models::{job, job_status::JobStatus};

use super::job_form::{JobForm, JobSearch};

pub async fn insert<C: ConnectionTrait>(db: &C, form: &JobForm) -> Result<job::Model, DbErr> {
    let now = Utc::now().naive_utc();

    job::ActiveModel {
        job_name: Set(form.job_name.clone()),
        job_group: Set(form.job_group.clone()),
        job_type: Set(form.job_type.clone()),
        arguments: Set(form.arguments_text()),
        cron_expression: Set(form.cron_expression.clone()),
        misfire_policy: Set(form.misfire_policy),
        concurrent: Set(form.concurrent),
        status: Set(form.status.unwrap_or_default()),
        remark: Set(form.remark.clone()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Overwrites every editable column of the job. Returns the number of rows touched.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    form: &JobForm,
    status: JobStatus,
) -> Result<u64, DbErr> {
    let result = job::Entity::update_many()
        .set(job::ActiveModel {
            job_name: Set(form.job_name.clone()),
            job_group: Set(form.job_group.clone()),
            job_type: Set(form.job_type.clone()),
            arguments: Set(form.arguments_text()),
            cron_expression: Set(form.cron_expression.clone()),
            misfire_policy: Set(form.misfire_policy),
            concurrent: Set(form.concurrent),
            status: Set(status),
            remark: Set(form.remark.clone()),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .filter(job::Column::Id.eq(id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

pub async fn update_status<C: ConnectionTrait>(
    db: &C,
    id: i32,
    status: JobStatus,
) -> Result<u64, DbErr> {
    let result = job::Entity::update_many()
        .set(job::ActiveModel {
            status: Set(status),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .filter(job::Column::Id.eq(id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Deletes the matching rows, ignoring ids that do not exist.
pub async fn delete_by_ids<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = job::Entity::delete_many()
        .filter(job::Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<job::Model>, DbErr> {
    job::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_ids<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<Vec<job::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    job::Entity::find()
        .filter(job::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(job::Column::Id)
        .all(db)
        .await
}

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<job::Model>, DbErr> {
    job::Entity::find()
        .order_by_asc(job::Column::Id)
        .all(db)
        .await
}

/// Number of jobs matching the search filter, ignoring its page.
pub async fn count<C: ConnectionTrait>(db: &C, search: &JobSearch) -> Result<u64, DbErr> {
    search_query(search).count(db).await
}

/// One page of jobs matching the search filter, oldest first.
pub async fn list<C: ConnectionTrait>(db: &C, search: &JobSearch) -> Result<Vec<job::Model>, DbErr> {
    let page = search.page();

    search_query(search)
        .order_by_asc(job::Column::Id)
        .limit(page.limit())
        .offset(page.offset())
        .all(db)
        .await
}

pub async fn distinct_groups<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, DbErr> {
    job::Entity::find()
        .select_only()
        .column(job::Column::JobGroup)
        .distinct()
        .order_by_asc(job::Column::JobGroup)
        .into_tuple::<String>()
        .all(db)
        .await
}

// Shared by `count` and `list` so both always see the same predicate.
fn search_query(search: &JobSearch) -> Select<job::Entity> {
    let condition = Condition::all()
        .add_option(
            search
                .job_name
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| job::Column::JobName.contains(name)),
        )
        .add_option(
            search
                .job_group
                .as_deref()
                .filter(|group| !group.is_empty())
                .map(|group| job::Column::JobGroup.eq(group)),
        )
        .add_option(search.status.map(|status| job::Column::Status.eq(status)));

    job::Entity::find().filter(condition)
}
