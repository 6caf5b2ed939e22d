use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::{
    runtime::Handle,
    sync::{watch, Notify},
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{debug, info, warn};

use super::{
    cron_expression,
    job_descriptor::JobDescriptor,
    job_key::JobKey,
    runner::TaskRunner,
    scheduler::{Scheduler, SchedulerError, TaskState},
};

/// Scheduler that runs every registered job in its own tokio task.
pub struct TokioScheduler {
    tasks: DashMap<JobKey, ScheduledTask>,
    runner: Arc<dyn TaskRunner>,
}

struct ScheduledTask {
    paused: watch::Sender<bool>,
    trigger: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TokioScheduler {
    pub fn new(runner: Arc<dyn TaskRunner>) -> Self {
        Self {
            tasks: DashMap::new(),
            runner,
        }
    }

    fn with_task<T>(
        &self,
        key: &JobKey,
        f: impl FnOnce(&ScheduledTask) -> T,
    ) -> Result<T, SchedulerError> {
        self.tasks
            .get(key)
            .map(|task| f(&task))
            .ok_or_else(|| SchedulerError::NotRegistered(key.clone()))
    }
}

impl Scheduler for TokioScheduler {
    fn create_schedule_job(&self, job: &JobDescriptor) -> Result<(), SchedulerError> {
        let schedule = cron_expression::parse(&job.cron_expression).map_err(|e| {
            SchedulerError::InvalidCron {
                key: job.key.clone(),
                expression: job.cron_expression.clone(),
                reason: e.to_string(),
            }
        })?;

        self.runner
            .validate(job)
            .map_err(|e| SchedulerError::TaskSetup {
                key: job.key.clone(),
                reason: e.to_string(),
            })?;

        let runtime = Handle::try_current().map_err(|e| SchedulerError::Engine(e.to_string()))?;

        let (paused_sender, paused_receiver) = watch::channel(job.status.is_paused());
        let trigger = Arc::new(Notify::new());

        let task_loop = TaskLoop {
            job: Arc::new(job.clone()),
            schedule,
            paused: paused_receiver,
            trigger: Arc::clone(&trigger),
            runner: Arc::clone(&self.runner),
            running: Arc::new(AtomicBool::new(false)),
        };

        let handle = runtime.spawn(task_loop.run());

        let replaced = self.tasks.insert(
            job.key.clone(),
            ScheduledTask {
                paused: paused_sender,
                trigger,
                handle,
            },
        );

        if replaced.is_some() {
            debug!("📅 Replaced existing task for job {}", job.key);
        }
        debug!(
            "📅 Registered job {} '{}' ({}) with schedule '{}'",
            job.key, job.name, job.status, job.cron_expression
        );

        Ok(())
    }

    fn check_exists(&self, key: &JobKey) -> bool {
        self.tasks.contains_key(key)
    }

    fn delete_job(&self, key: &JobKey) -> Result<bool, SchedulerError> {
        let removed = self.tasks.remove(key).is_some();
        if removed {
            debug!("📅 Removed job {}", key);
        }
        Ok(removed)
    }

    fn pause_job(&self, key: &JobKey) -> Result<(), SchedulerError> {
        self.with_task(key, |task| task.paused.send_replace(true))?;
        debug!("⏸️  Paused job {}", key);
        Ok(())
    }

    fn resume_job(&self, key: &JobKey) -> Result<(), SchedulerError> {
        self.with_task(key, |task| task.paused.send_replace(false))?;
        debug!("▶️  Resumed job {}", key);
        Ok(())
    }

    fn trigger_job(&self, key: &JobKey) -> Result<(), SchedulerError> {
        self.with_task(key, |task| task.trigger.notify_one())
    }

    fn clear(&self) -> Result<(), SchedulerError> {
        let count = self.tasks.len();
        self.tasks.clear();
        info!("📅 Cleared {} scheduled jobs", count);
        Ok(())
    }

    fn task_state(&self, key: &JobKey) -> Option<TaskState> {
        self.tasks.get(key).map(|task| {
            if *task.paused.borrow() {
                TaskState::Paused
            } else {
                TaskState::Normal
            }
        })
    }

    fn job_keys(&self) -> Vec<JobKey> {
        self.tasks.iter().map(|entry| entry.key().clone()).collect()
    }
}

/// The loop behind one registered job.
struct TaskLoop {
    job: Arc<JobDescriptor>,
    schedule: cron::Schedule,
    paused: watch::Receiver<bool>,
    trigger: Arc<Notify>,
    runner: Arc<dyn TaskRunner>,
    running: Arc<AtomicBool>,
}

impl TaskLoop {
    async fn run(mut self) {
        debug!("📅 Starting scheduler task for {}", self.job.key);

        // Last fire time handled, so a slightly early wake-up never fires twice
        let mut cursor = Utc::now();
        let mut missed: u32 = 0;

        loop {
            let next = self.schedule.after(&cursor.max(Utc::now())).next();
            if next.is_none() {
                debug!("📅 Job {} has no upcoming fire time", self.job.key);
            }

            tokio::select! {
                () = wait_until_execution_time(next) => {
                    if let Some(fire_time) = next {
                        cursor = fire_time;
                    }
                    if *self.paused.borrow() {
                        missed = missed.saturating_add(1);
                        debug!("⏸️  Job {} missed a firing while paused", self.job.key);
                    } else {
                        self.fire("schedule", 1);
                    }
                }
                () = self.trigger.notified() => {
                    self.fire("manual trigger", 1);
                }
                changed = self.paused.changed() => {
                    if changed.is_err() {
                        // Task was removed from the scheduler
                        break;
                    }
                    let paused = *self.paused.borrow_and_update();
                    if !paused {
                        let runs = self.job.misfire_policy.catch_up_runs(missed);
                        if missed > 0 {
                            debug!(
                                "▶️  Job {} resumed after {} misfire(s), {} catch-up run(s)",
                                self.job.key, missed, runs
                            );
                        }
                        missed = 0;
                        self.fire("misfire catch-up", runs);
                    }
                }
            }
        }
    }

    /// Runs the job `runs` times, one run after another, in a single spawned task.
    fn fire(&self, reason: &'static str, runs: u32) {
        if runs == 0 {
            return;
        }

        let guard = if self.job.concurrent {
            None
        } else if let Some(guard) = RunningGuard::acquire(&self.running) {
            Some(guard)
        } else {
            warn!(
                "⏭️  Skipping {} of job {}: previous run still in progress",
                reason, self.job.key
            );
            return;
        };

        debug!("🔔 Firing job {} ({}, {} run(s))", self.job.key, reason, runs);

        let runner = Arc::clone(&self.runner);
        let job = Arc::clone(&self.job);

        tokio::spawn(async move {
            let _guard = guard;
            for _ in 0..runs {
                runner.run(Arc::clone(&job)).await;
            }
        });
    }
}

/// Marks a non-concurrent job as running until dropped, including when a run panics.
struct RunningGuard(Arc<AtomicBool>);

impl RunningGuard {
    fn acquire(running: &Arc<AtomicBool>) -> Option<Self> {
        if running.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(Arc::clone(running)))
        }
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Wait until the specified execution time, forever when there is none
async fn wait_until_execution_time(next_execution: Option<DateTime<Utc>>) {
    let Some(next_execution) = next_execution else {
        std::future::pending::<()>().await;
        return;
    };

    let sleep_duration = (next_execution - Utc::now()).to_std().unwrap_or_default();
    if sleep_duration > Duration::ZERO {
        sleep_until(Instant::now() + sleep_duration).await;
    }
}
