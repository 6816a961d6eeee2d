pub mod model;
pub mod orchestrator;
pub mod registry;
pub mod sources;

pub use model::{JobStatus, JobView, Progress};
pub use orchestrator::BatchOrchestrator;
pub use registry::JobRegistry;
