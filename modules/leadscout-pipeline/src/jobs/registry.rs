use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use leadscout_common::{LeadScoutError, Outcome};

use super::model::{Job, JobStatus, JobView};

/// Process-wide table of jobs, shared by handle.
///
/// The lock is held only for the duration of one field update, never across a
/// collaborator call. Each update is a single critical section, so readers see
/// either all of it or none of it.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<RwLock<HashMap<Uuid, Job>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, total: usize, message: impl Into<String>) -> Uuid {
        let job = Job::new(total, message);
        let id = job.id;
        self.jobs.write().await.insert(id, job);
        debug!(job_id = %id, total, "Job registered");
        id
    }

    pub async fn status(&self, id: Uuid) -> Result<JobView, LeadScoutError> {
        self.jobs
            .read()
            .await
            .get(&id)
            .map(Job::view)
            .ok_or(LeadScoutError::JobNotFound(id))
    }

    pub async fn set_total(&self, id: Uuid, total: usize, message: impl Into<String>) {
        let message = message.into();
        self.update(id, |job| {
            job.progress.total = total;
            job.progress.message = message;
        })
        .await;
    }

    /// Mark item `current` (1-based) as in progress. `current` never decreases.
    pub async fn begin_item(&self, id: Uuid, current: usize, message: impl Into<String>) {
        let message = message.into();
        self.update(id, |job| {
            job.progress.current = job.progress.current.max(current);
            job.progress.message = message;
        })
        .await;
    }

    /// Append one identity's outcome.
    pub async fn record(&self, id: Uuid, outcome: Outcome) {
        self.update(id, |job| match outcome {
            Outcome::Lead(lead) => job.results.push(*lead),
            Outcome::Skip(skip) => job.skipped.push(skip),
        })
        .await;
    }

    pub async fn complete(&self, id: Uuid) {
        self.update(id, |job| {
            job.status = JobStatus::Completed;
            job.completed_at = Some(Utc::now());
            job.progress.message = format!(
                "Completed! {} successful, {} skipped",
                job.results.len(),
                job.skipped.len()
            );
        })
        .await;
    }

    pub async fn fail(&self, id: Uuid, error: impl Into<String>) {
        let error = error.into();
        self.update(id, |job| {
            job.status = JobStatus::Failed;
            job.completed_at = Some(Utc::now());
            job.progress.message = format!("Error: {error}");
            job.error = Some(error);
        })
        .await;
    }

    /// Apply `f` to a running job. Terminal jobs are immutable.
    async fn update(&self, id: Uuid, f: impl FnOnce(&mut Job)) {
        let mut jobs = self.jobs.write().await;
        match jobs.get_mut(&id) {
            Some(job) if job.status.is_terminal() => {
                warn!(job_id = %id, status = ?job.status, "Ignoring update to finished job");
            }
            Some(job) => f(job),
            None => warn!(job_id = %id, "Update for unknown job"),
        }
    }
}
