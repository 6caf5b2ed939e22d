//! Job management: the only writer of both `sched_job` and the live scheduler.
//!
//! Every mutation writes the store inside a transaction and calls the
//! scheduler before committing, so a scheduler failure rolls the write back.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    database::models::job_status::JobStatus,
    page::{PageQuery, ResultPage},
};

use super::{
    cron_expression,
    job_descriptor::JobDescriptor,
    job_form::{JobForm, JobRunForm, JobSearch, JobStatusForm},
    job_key::JobKey,
    job_logs, job_store,
    job_view::{JobLogView, JobView},
    scheduler::{Scheduler, SchedulerError},
};

#[derive(Debug, Error)]
pub enum JobServiceError {
    #[error("Invalid cron expression: '{0}'")]
    InvalidCron(String),
    #[error("Job {0} not found")]
    NotFound(i32),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Whether a request changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NoOp,
}

/// Result of an on-demand reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub registered: usize,
    pub failed: Vec<FailedJob>,
}

/// A job that could not be registered during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedJob {
    pub id: i32,
    pub reason: String,
}

#[derive(Clone)]
pub struct JobService {
    db: DatabaseConnection,
    scheduler: Arc<dyn Scheduler>,
}

impl JobService {
    pub fn new(db: DatabaseConnection, scheduler: Arc<dyn Scheduler>) -> Self {
        Self { db, scheduler }
    }

    pub fn scheduler(&self) -> &Arc<dyn Scheduler> {
        &self.scheduler
    }

    /// Rebuilds the scheduler from the store: clears it and registers every
    /// persisted job in its persisted state. Stops at the first job that
    /// cannot be registered.
    pub async fn init(&self) -> Result<usize, JobServiceError> {
        self.scheduler.clear()?;

        let jobs = job_store::find_all(&self.db).await?;
        for job in &jobs {
            let descriptor = JobDescriptor::try_from(job)?;
            self.scheduler.create_schedule_job(&descriptor)?;
            debug!("📅 Registered job {} ({})", descriptor.key, descriptor.status);
        }

        info!("📅 Scheduler reconciled with {} job(s)", jobs.len());
        Ok(jobs.len())
    }

    /// Repairs the scheduler of a running process. Every job is converted
    /// before the scheduler is cleared, and a job that cannot be registered is
    /// reported instead of stopping the rest.
    pub async fn reconcile(&self) -> Result<Reconciliation, JobServiceError> {
        let jobs = job_store::find_all(&self.db).await?;

        let mut failed = Vec::new();
        let mut descriptors = Vec::with_capacity(jobs.len());
        for job in &jobs {
            match JobDescriptor::try_from(job) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => failed.push(FailedJob {
                    id: job.id,
                    reason: e.to_string(),
                }),
            }
        }

        self.scheduler.clear()?;

        let mut registered = 0;
        for descriptor in &descriptors {
            match self.scheduler.create_schedule_job(descriptor) {
                Ok(()) => registered += 1,
                Err(e) => failed.push(FailedJob {
                    id: descriptor.key.id,
                    reason: e.to_string(),
                }),
            }
        }

        for job in &failed {
            warn!("📅 Job {} left unscheduled: {}", job.id, job.reason);
        }
        info!(
            "📅 Scheduler reconciled: {} registered, {} failed",
            registered,
            failed.len()
        );

        Ok(Reconciliation { registered, failed })
    }

    pub async fn save_job(&self, form: &JobForm) -> Result<JobView, JobServiceError> {
        ensure_valid_cron(&form.cron_expression)?;

        let txn = self.db.begin().await?;
        let job = job_store::insert(&txn, form).await?;
        let descriptor = JobDescriptor::try_from(&job)?;
        self.scheduler.create_schedule_job(&descriptor)?;
        txn.commit().await?;

        info!("➕ Saved job {} '{}'", descriptor.key, job.job_name);
        Ok(JobView::from(job))
    }

    /// Replaces the definition of job `id` and re-registers its task. The
    /// status is kept unless the form sets one.
    pub async fn update_job(&self, id: i32, form: &JobForm) -> Result<JobView, JobServiceError> {
        ensure_valid_cron(&form.cron_expression)?;

        let txn = self.db.begin().await?;
        let existing = job_store::find_by_id(&txn, id)
            .await?
            .ok_or(JobServiceError::NotFound(id))?;

        job_store::update(&txn, id, form, form.status.unwrap_or(existing.status)).await?;
        let updated = job_store::find_by_id(&txn, id)
            .await?
            .ok_or(JobServiceError::NotFound(id))?;

        let old_key = JobKey::from(&existing);
        let descriptor = JobDescriptor::try_from(&updated)?;
        // Registering under an existing key replaces the task; a changed group
        // leaves the old task behind under its previous key.
        self.scheduler.create_schedule_job(&descriptor)?;
        if old_key != descriptor.key {
            self.scheduler.delete_job(&old_key)?;
        }
        txn.commit().await?;

        info!("✏️  Updated job {} '{}'", descriptor.key, updated.job_name);
        Ok(JobView::from(updated))
    }

    /// Deletes the jobs that exist among `ids` and their tasks. Returns the
    /// number of jobs deleted.
    pub async fn delete_jobs(&self, ids: &[i32]) -> Result<u64, JobServiceError> {
        let txn = self.db.begin().await?;
        // Read first: the delete only reports a count, the keys are needed after.
        let jobs = job_store::find_by_ids(&txn, ids).await?;
        let deleted = job_store::delete_by_ids(&txn, ids).await?;

        if deleted > 0 {
            for job in &jobs {
                let key = JobKey::from(job);
                if !self.scheduler.delete_job(&key)? {
                    warn!("🗑️  Job {} had no live task to delete", key);
                }
            }
        }
        txn.commit().await?;

        info!("🗑️  Deleted {} job(s)", deleted);
        Ok(deleted)
    }

    /// The job with its next fire time, if it has one.
    pub async fn get_job_by_id(&self, id: i32) -> Result<Option<JobView>, JobServiceError> {
        let job = job_store::find_by_id(&self.db, id).await?;

        Ok(job.map(|job| {
            let next_valid_time = cron_expression::next_execution(&job.cron_expression);
            JobView {
                next_valid_time,
                ..JobView::from(job)
            }
        }))
    }

    /// One page of jobs. Count and page are fetched concurrently under the
    /// same filter; either failing fails the listing.
    pub async fn list_jobs(&self, search: &JobSearch) -> Result<ResultPage<JobView>, JobServiceError> {
        let (total, jobs) = tokio::try_join!(
            job_store::count(&self.db, search),
            job_store::list(&self.db, search),
        )?;

        Ok(ResultPage::new(jobs, total).map(JobView::from))
    }

    /// Pauses or resumes a job. Asking for the status it already has is a no-op.
    pub async fn update_job_status(&self, form: &JobStatusForm) -> Result<Outcome, JobServiceError> {
        let txn = self.db.begin().await?;
        let job = job_store::find_by_id(&txn, form.id)
            .await?
            .ok_or(JobServiceError::NotFound(form.id))?;

        if job.status == form.status {
            debug!("⏭️  Job {} is already {}", form.id, form.status);
            return Ok(Outcome::NoOp);
        }

        job_store::update_status(&txn, form.id, form.status).await?;
        let key = JobKey::from(&job);
        match form.status {
            JobStatus::Normal => self.scheduler.resume_job(&key)?,
            JobStatus::Pause => self.scheduler.pause_job(&key)?,
        }
        txn.commit().await?;

        info!("🔀 Job {} is now {}", key, form.status);
        Ok(Outcome::Applied)
    }

    /// Fires the task once. Status and schedule are left alone.
    pub fn run_job(&self, form: &JobRunForm) -> Result<(), JobServiceError> {
        let key = JobKey::new(form.id, form.job_group.clone());
        self.scheduler.trigger_job(&key)?;

        info!("🚀 Triggered job {}", key);
        Ok(())
    }

    pub async fn list_groups(&self) -> Result<Vec<String>, JobServiceError> {
        Ok(job_store::distinct_groups(&self.db).await?)
    }

    pub async fn list_job_logs(
        &self,
        id: i32,
        page: PageQuery,
    ) -> Result<ResultPage<JobLogView>, JobServiceError> {
        if job_store::find_by_id(&self.db, id).await?.is_none() {
            return Err(JobServiceError::NotFound(id));
        }

        Ok(job_logs::list_logs(&self.db, id, page).await?)
    }
}

fn ensure_valid_cron(expression: &str) -> Result<(), JobServiceError> {
    if cron_expression::is_valid(expression) {
        Ok(())
    } else {
        Err(JobServiceError::InvalidCron(expression.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::models::misfire_policy::MisfirePolicy,
        jobs::{
            builtin::builtin_registry, engine::TokioScheduler, runner::JobRunner,
            scheduler::TaskState, JobContext,
        },
        tests::{
            recording_scheduler::{RecordingScheduler, SchedulerCall},
            setup_test::{setup_db, test_config, NoopRunner},
        },
    };
    use serde_json::json;

    fn form(name: &str, group: &str) -> JobForm {
        JobForm {
            job_name: name.to_string(),
            job_group: group.to_string(),
            job_type: "heartbeat".to_string(),
            arguments: None,
            cron_expression: "0 0 * * * ?".to_string(),
            misfire_policy: MisfirePolicy::Default,
            concurrent: false,
            status: None,
            remark: None,
        }
    }

    async fn service() -> (JobService, Arc<RecordingScheduler>) {
        let scheduler = Arc::new(RecordingScheduler::default());
        (JobService::new(setup_db().await, scheduler.clone()), scheduler)
    }

    #[tokio::test]
    async fn test_save_registers_normal_task() {
        let (service, scheduler) = service().await;

        let job = service.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();

        let key = JobKey::new(job.id, "DEFAULT");
        assert_eq!(job.status, JobStatus::Normal);
        assert_eq!(scheduler.task_state(&key), Some(TaskState::Normal));
    }

    #[tokio::test]
    async fn test_save_with_invalid_cron_has_no_side_effects() {
        let (service, scheduler) = service().await;
        let mut form = form("Broken", "DEFAULT");
        form.cron_expression = "every minute".to_string();

        let result = service.save_job(&form).await;

        assert!(matches!(result, Err(JobServiceError::InvalidCron(_))));
        assert!(scheduler.calls().is_empty());
        assert_eq!(service.list_jobs(&JobSearch::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_save_rolls_back_when_scheduler_rejects() {
        let (service, scheduler) = service().await;
        scheduler.fail_next_create("engine unavailable");

        let result = service.save_job(&form("Heartbeat", "DEFAULT")).await;

        assert!(matches!(result, Err(JobServiceError::Scheduler(_))));
        assert_eq!(service.list_jobs(&JobSearch::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_update_with_invalid_cron_has_no_side_effects() {
        let (service, scheduler) = service().await;
        let job = service.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();
        scheduler.reset_calls();

        let mut changed = form("Renamed", "DEFAULT");
        changed.cron_expression = "61 * * * * ?".to_string();
        let result = service.update_job(job.id, &changed).await;

        assert!(matches!(result, Err(JobServiceError::InvalidCron(_))));
        assert!(scheduler.calls().is_empty());
        let stored = service.get_job_by_id(job.id).await.unwrap().unwrap();
        assert_eq!(stored.job_name, "Heartbeat");
    }

    #[tokio::test]
    async fn test_update_moves_task_to_new_group() {
        let (service, scheduler) = service().await;
        let mut original = form("Heartbeat", "DEFAULT");
        original.arguments = Some(json!({ "message": "tick" }));
        original.cron_expression = "0 15 * * * ?".to_string();
        let job = service.save_job(&original).await.unwrap();

        let mut moved = original.clone();
        moved.job_group = "SYSTEM".to_string();
        let updated = service.update_job(job.id, &moved).await.unwrap();

        assert_eq!(updated.job_group, "SYSTEM");
        assert!(!scheduler.check_exists(&JobKey::new(job.id, "DEFAULT")));
        assert_eq!(scheduler.job_keys(), vec![JobKey::new(job.id, "SYSTEM")]);

        let registered = scheduler
            .registered_job(&JobKey::new(job.id, "SYSTEM"))
            .unwrap();
        assert_eq!(registered.cron_expression, "0 15 * * * ?");
        assert_eq!(registered.arguments, json!({ "message": "tick" }));
        assert_eq!(registered.job_type, "heartbeat");
    }

    #[tokio::test]
    async fn test_update_keeps_paused_status() {
        let (service, scheduler) = service().await;
        let job = service.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();
        service
            .update_job_status(&JobStatusForm {
                id: job.id,
                status: JobStatus::Pause,
            })
            .await
            .unwrap();

        let mut changed = form("Heartbeat", "DEFAULT");
        changed.cron_expression = "0 30 * * * ?".to_string();
        let updated = service.update_job(job.id, &changed).await.unwrap();

        assert_eq!(updated.status, JobStatus::Pause);
        assert_eq!(updated.cron_expression, "0 30 * * * ?");
        assert_eq!(
            scheduler.task_state(&JobKey::new(job.id, "DEFAULT")),
            Some(TaskState::Paused)
        );
    }

    #[tokio::test]
    async fn test_update_of_missing_job_is_not_found() {
        let (service, scheduler) = service().await;

        let result = service.update_job(7, &form("Ghost", "DEFAULT")).await;

        assert!(matches!(result, Err(JobServiceError::NotFound(7))));
        assert!(scheduler.calls().is_empty());
    }

    #[tokio::test]
    async fn test_status_change_to_current_status_is_noop() {
        let (service, scheduler) = service().await;
        let job = service.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();
        scheduler.reset_calls();

        let outcome = service
            .update_job_status(&JobStatusForm {
                id: job.id,
                status: JobStatus::Normal,
            })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        assert!(scheduler.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pause_then_resume_without_reregistering() {
        let (service, scheduler) = service().await;
        let job = service.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();
        let key = JobKey::new(job.id, "DEFAULT");
        scheduler.reset_calls();

        for status in [JobStatus::Pause, JobStatus::Normal] {
            let outcome = service
                .update_job_status(&JobStatusForm { id: job.id, status })
                .await
                .unwrap();
            assert_eq!(outcome, Outcome::Applied);
        }

        assert_eq!(
            scheduler.calls(),
            vec![SchedulerCall::Pause(key.clone()), SchedulerCall::Resume(key.clone())]
        );
        assert_eq!(scheduler.task_state(&key), Some(TaskState::Normal));
        let stored = service.get_job_by_id(job.id).await.unwrap().unwrap();
        assert_eq!(stored.status, JobStatus::Normal);
    }

    #[tokio::test]
    async fn test_status_change_of_missing_job_is_not_found() {
        let (service, _) = service().await;

        let result = service
            .update_job_status(&JobStatusForm {
                id: 3,
                status: JobStatus::Pause,
            })
            .await;

        assert!(matches!(result, Err(JobServiceError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_delete_skips_missing_ids() {
        let (service, scheduler) = service().await;
        let kept = service.save_job(&form("Kept", "DEFAULT")).await.unwrap();
        let gone = service.save_job(&form("Gone", "DEFAULT")).await.unwrap();

        let deleted = service.delete_jobs(&[gone.id, 404]).await.unwrap();

        assert_eq!(deleted, 1);
        assert!(!scheduler.check_exists(&JobKey::new(gone.id, "DEFAULT")));
        assert!(scheduler.check_exists(&JobKey::new(kept.id, "DEFAULT")));
        assert!(service.get_job_by_id(gone.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_of_unknown_ids_touches_nothing() {
        let (service, scheduler) = service().await;
        service.save_job(&form("Kept", "DEFAULT")).await.unwrap();
        scheduler.reset_calls();

        assert_eq!(service.delete_jobs(&[404, 405]).await.unwrap(), 0);
        assert!(scheduler.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_includes_next_fire_time() {
        let (service, _) = service().await;
        let job = service.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();

        let found = service.get_job_by_id(job.id).await.unwrap().unwrap();

        assert!(found.next_valid_time.unwrap() > chrono::Utc::now());
        assert!(service.get_job_by_id(job.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_total_matches_filter() {
        let (service, _) = service().await;
        for i in 0..5 {
            service
                .save_job(&form(&format!("Report {i}"), "REPORTS"))
                .await
                .unwrap();
        }
        service.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();

        let page = service
            .list_jobs(&JobSearch {
                job_group: Some("REPORTS".to_string()),
                current: Some(2),
                size: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(|job| job.next_valid_time.is_none()));
    }

    #[tokio::test]
    async fn test_run_job_does_not_change_status() {
        let (service, scheduler) = service().await;
        let job = service.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();
        service
            .update_job_status(&JobStatusForm {
                id: job.id,
                status: JobStatus::Pause,
            })
            .await
            .unwrap();
        let key = JobKey::new(job.id, "DEFAULT");
        let registered_before = scheduler.registered_job(&key);
        scheduler.reset_calls();

        service
            .run_job(&JobRunForm {
                id: job.id,
                job_group: "DEFAULT".to_string(),
            })
            .unwrap();

        assert_eq!(scheduler.calls(), vec![SchedulerCall::Trigger(key.clone())]);
        assert_eq!(scheduler.task_state(&key), Some(TaskState::Paused));
        assert_eq!(scheduler.registered_job(&key), registered_before);
        let after = service.get_job_by_id(job.id).await.unwrap().unwrap();
        assert_eq!(after.status, JobStatus::Pause);
    }

    #[tokio::test]
    async fn test_run_unregistered_job_fails() {
        let (service, _) = service().await;

        let result = service.run_job(&JobRunForm {
            id: 1,
            job_group: "DEFAULT".to_string(),
        });

        assert!(matches!(
            result,
            Err(JobServiceError::Scheduler(SchedulerError::NotRegistered(_)))
        ));
    }

    #[tokio::test]
    async fn test_list_groups() {
        let (service, _) = service().await;
        service.save_job(&form("a", "SYSTEM")).await.unwrap();
        service.save_job(&form("b", "DEFAULT")).await.unwrap();

        assert_eq!(
            service.list_groups().await.unwrap(),
            vec!["DEFAULT".to_string(), "SYSTEM".to_string()]
        );
    }

    #[tokio::test]
    async fn test_logs_of_missing_job_are_not_found() {
        let (service, _) = service().await;

        let result = service.list_job_logs(9, PageQuery::default()).await;

        assert!(matches!(result, Err(JobServiceError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_init_with_no_jobs_empties_scheduler() {
        let (service, scheduler) = service().await;
        scheduler.insert_stale(JobKey::new(99, "DEFAULT"));

        assert_eq!(service.init().await.unwrap(), 0);
        assert!(scheduler.job_keys().is_empty());
    }

    #[tokio::test]
    async fn test_init_restores_persisted_states() {
        let (service, scheduler) = service().await;
        let running = service.save_job(&form("Running", "DEFAULT")).await.unwrap();
        let paused = service.save_job(&form("Paused", "SYSTEM")).await.unwrap();
        service
            .update_job_status(&JobStatusForm {
                id: paused.id,
                status: JobStatus::Pause,
            })
            .await
            .unwrap();
        scheduler.clear().unwrap();

        assert_eq!(service.init().await.unwrap(), 2);

        assert_eq!(
            scheduler.task_state(&JobKey::new(running.id, "DEFAULT")),
            Some(TaskState::Normal)
        );
        assert_eq!(
            scheduler.task_state(&JobKey::new(paused.id, "SYSTEM")),
            Some(TaskState::Paused)
        );
    }

    #[tokio::test]
    async fn test_init_fails_on_first_bad_job() {
        let (service, scheduler) = service().await;
        service.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();
        scheduler.fail_next_create("engine unavailable");

        assert!(matches!(
            service.init().await,
            Err(JobServiceError::Scheduler(_))
        ));
    }

    #[tokio::test]
    async fn test_init_on_tokio_scheduler() {
        let db = setup_db().await;
        let recording = JobService::new(db.clone(), Arc::new(RecordingScheduler::default()));
        let job = recording.save_job(&form("Heartbeat", "DEFAULT")).await.unwrap();
        recording
            .update_job_status(&JobStatusForm {
                id: job.id,
                status: JobStatus::Pause,
            })
            .await
            .unwrap();

        let scheduler = Arc::new(TokioScheduler::new(Arc::new(NoopRunner)));
        let service = JobService::new(db, scheduler.clone());

        assert_eq!(service.init().await.unwrap(), 1);
        assert_eq!(
            scheduler.task_state(&JobKey::new(job.id, "DEFAULT")),
            Some(TaskState::Paused)
        );
    }

    #[tokio::test]
    async fn test_save_with_unbindable_arguments_is_rejected() {
        let db = setup_db().await;
        let ctx = JobContext {
            config: test_config(),
            db: db.clone(),
        };
        let runner = JobRunner::new(builtin_registry(), ctx);
        let scheduler = Arc::new(TokioScheduler::new(Arc::new(runner)));
        let service = JobService::new(db, scheduler.clone());

        let mut purge = form("Purge logs", "SYSTEM");
        purge.job_type = "purge_job_logs".to_string();
        purge.arguments = Some(json!({ "retention": "x" }));
        let result = service.save_job(&purge).await;

        assert!(matches!(
            result,
            Err(JobServiceError::Scheduler(SchedulerError::TaskSetup { .. }))
        ));
        assert!(scheduler.job_keys().is_empty());
        assert_eq!(service.list_jobs(&JobSearch::default()).await.unwrap().total, 0);

        purge.arguments = Some(json!({ "retention_days": 30 }));
        let saved = service.save_job(&purge).await.unwrap();
        assert!(scheduler.check_exists(&JobKey::new(saved.id, "SYSTEM")));
    }

    #[tokio::test]
    async fn test_reconcile_registers_good_jobs_past_a_bad_one() {
        let (service, scheduler) = service().await;
        let first = service.save_job(&form("First", "DEFAULT")).await.unwrap();
        let mut broken = form("Broken", "DEFAULT");
        broken.cron_expression = "whenever".to_string();
        // Written straight to the store, as a row edited outside the service would be
        let bad = job_store::insert(&service.db, &broken).await.unwrap();
        let last = service.save_job(&form("Last", "SYSTEM")).await.unwrap();
        scheduler.insert_stale(JobKey::new(99, "DEFAULT"));

        let reconciliation = service.reconcile().await.unwrap();

        assert_eq!(reconciliation.registered, 2);
        assert_eq!(reconciliation.failed.len(), 1);
        assert_eq!(reconciliation.failed[0].id, bad.id);
        assert!(scheduler.check_exists(&JobKey::new(first.id, "DEFAULT")));
        assert!(scheduler.check_exists(&JobKey::new(last.id, "SYSTEM")));
        assert!(!scheduler.check_exists(&JobKey::new(bad.id, "DEFAULT")));
        assert!(!scheduler.check_exists(&JobKey::new(99, "DEFAULT")));
    }

    #[tokio::test]
    async fn test_init_still_stops_at_a_bad_job() {
        let (service, _) = service().await;
        let mut broken = form("Broken", "DEFAULT");
        broken.cron_expression = "whenever".to_string();
        job_store::insert(&service.db, &broken).await.unwrap();

        assert!(matches!(
            service.init().await,
            Err(JobServiceError::Scheduler(SchedulerError::InvalidCron { .. }))
        ));
    }
}
