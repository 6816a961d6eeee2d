use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leadscout_common::{Lead, Skip};

/// No pending state: submission starts work immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

/// Registry-owned job record. Only the registry mutates it.
#[derive(Debug, Clone)]
pub(crate) struct Job {
    pub id: Uuid,
    pub status: JobStatus,
    pub progress: Progress,
    pub results: Vec<Lead>,
    pub skipped: Vec<Skip>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl Job {
    pub fn new(total: usize, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: JobStatus::Running,
            progress: Progress {
                current: 0,
                total,
                message: message.into(),
            },
            results: Vec::new(),
            skipped: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
            error: None,
        }
    }

    pub fn view(&self) -> JobView {
        JobView {
            job_id: self.id,
            status: self.status,
            progress: self.progress.clone(),
            results: self.results.clone(),
            skipped_profiles: self.skipped.clone(),
            started_at: self.started_at,
            completed_at: self.completed_at,
            error: self.error.clone(),
        }
    }
}

/// Point-in-time snapshot returned to status readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobView {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub progress: Progress,
    pub results: Vec<Lead>,
    pub skipped_profiles: Vec<Skip>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl JobView {
    /// Leads plus skips recorded so far.
    pub fn recorded(&self) -> usize {
        self.results.len() + self.skipped_profiles.len()
    }
}
