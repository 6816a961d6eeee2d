pub mod enrichment;
pub mod extraction;
pub mod infra;
pub mod jobs;
pub mod pipeline;
pub mod prompts;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use jobs::{BatchOrchestrator, JobRegistry, JobStatus, JobView, Progress};
pub use pipeline::{DeadlineExecutor, LeadPipeline};
