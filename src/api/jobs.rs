use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;

use crate::{
    api::{validated_json::ValidatedJson, ApiError, ApiResult},
    app::App,
    auth::CurrentUser,
    jobs::{
        job_form::{JobForm, JobIds, JobRunForm, JobSearch, JobStatusForm},
        job_service::{JobService, Outcome, Reconciliation},
        job_view::{JobLogView, JobView},
    },
    page::{PageQuery, ResultPage},
};

/// Job management, nested under `/api/admin/jobs`.
pub fn routes() -> Router<App> {
    Router::new()
        .route("/", get(list).post(save).delete(delete))
        .route("/groups", get(groups))
        .route("/status", put(update_status))
        .route("/run", put(run))
        .route("/reconcile", post(reconcile))
        .route("/{id}", get(show).put(update))
        .route("/{id}/logs", get(logs))
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
pub struct StatusChange {
    pub changed: bool,
}

async fn list(
    _user: CurrentUser,
    State(jobs): State<JobService>,
    Query(search): Query<JobSearch>,
) -> ApiResult<ResultPage<JobView>> {
    Ok(Json(jobs.list_jobs(&search).await?))
}

async fn save(
    _user: CurrentUser,
    State(jobs): State<JobService>,
    ValidatedJson(form): ValidatedJson<JobForm>,
) -> Result<(StatusCode, Json<JobView>), ApiError> {
    let job = jobs.save_job(&form).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

async fn update(
    _user: CurrentUser,
    State(jobs): State<JobService>,
    Path(id): Path<i32>,
    ValidatedJson(form): ValidatedJson<JobForm>,
) -> ApiResult<JobView> {
    Ok(Json(jobs.update_job(id, &form).await?))
}

async fn delete(
    _user: CurrentUser,
    State(jobs): State<JobService>,
    Json(JobIds { ids }): Json<JobIds>,
) -> ApiResult<Deleted> {
    let deleted = jobs.delete_jobs(&ids).await?;
    Ok(Json(Deleted { deleted }))
}

async fn show(
    _user: CurrentUser,
    State(jobs): State<JobService>,
    Path(id): Path<i32>,
) -> ApiResult<JobView> {
    jobs.get_job_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Job {id} not found")))
}

async fn logs(
    _user: CurrentUser,
    State(jobs): State<JobService>,
    Path(id): Path<i32>,
    Query(page): Query<PageQuery>,
) -> ApiResult<ResultPage<JobLogView>> {
    Ok(Json(jobs.list_job_logs(id, page).await?))
}

async fn update_status(
    _user: CurrentUser,
    State(jobs): State<JobService>,
    Json(form): Json<JobStatusForm>,
) -> ApiResult<StatusChange> {
    let outcome = jobs.update_job_status(&form).await?;
    Ok(Json(StatusChange {
        changed: outcome == Outcome::Applied,
    }))
}

async fn run(
    _user: CurrentUser,
    State(jobs): State<JobService>,
    Json(form): Json<JobRunForm>,
) -> Result<StatusCode, ApiError> {
    jobs.run_job(&form)?;
    Ok(StatusCode::ACCEPTED)
}

async fn groups(_user: CurrentUser, State(jobs): State<JobService>) -> ApiResult<Vec<String>> {
    Ok(Json(jobs.list_groups().await?))
}

async fn reconcile(_user: CurrentUser, State(jobs): State<JobService>) -> ApiResult<Reconciliation> {
    Ok(Json(jobs.reconcile().await?))
}
