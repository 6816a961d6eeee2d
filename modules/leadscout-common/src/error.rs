use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LeadScoutError {
    #[error("Job not found: {0}")]
    JobNotFound(Uuid),
}
