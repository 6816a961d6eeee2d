use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{error, info, warn};

use leadscout_common::{Identity, Outcome, Skip};

use super::stages::LeadPipeline;

/// Runs one identity through the stage chain on its own task and bounds the
/// caller's wait by a fixed deadline.
///
/// On expiry the task is aborted. Aborting is best-effort: a collaborator call
/// already in flight may keep its connection open until the runtime drops it,
/// but the caller never waits past the deadline.
#[derive(Clone)]
pub struct DeadlineExecutor {
    pipeline: Arc<LeadPipeline>,
    deadline: Duration,
}

impl DeadlineExecutor {
    pub fn new(pipeline: Arc<LeadPipeline>, deadline: Duration) -> Self {
        Self { pipeline, deadline }
    }

    /// Always yields exactly one outcome.
    pub async fn run(&self, identity: &Identity) -> Outcome {
        let started = Instant::now();
        let pipeline = self.pipeline.clone();
        let owned = identity.clone();
        let mut handle = tokio::spawn(async move { pipeline.process(&owned).await });

        let outcome = match tokio::time::timeout(self.deadline, &mut handle).await {
            Ok(Ok(Ok(outcome))) => outcome,
            Ok(Ok(Err(e))) => {
                warn!(urn = %identity.urn, error = %e, "Identity processing failed");
                Outcome::Skip(Skip::for_identity(
                    identity,
                    format!("Error during processing: {e}"),
                ))
            }
            Ok(Err(join_error)) => {
                error!(urn = %identity.urn, error = %join_error, "Identity task did not complete");
                Outcome::Skip(Skip::for_identity(
                    identity,
                    format!("Unexpected error in timeout wrapper: {join_error}"),
                ))
            }
            Err(_) => {
                handle.abort();
                let actual = started.elapsed();
                warn!(
                    urn = %identity.urn,
                    deadline_secs = self.deadline.as_secs_f64(),
                    elapsed_ms = actual.as_millis() as u64,
                    "Identity processing exceeded deadline, abandoning task"
                );
                Outcome::Skip(Skip::for_identity(
                    identity,
                    format!(
                        "Processing exceeded {}s timeout (actual: {:.1}s)",
                        whole_or_fractional_secs(self.deadline),
                        actual.as_secs_f64()
                    ),
                ))
            }
        };

        info!(
            urn = %identity.urn,
            lead = outcome.is_lead(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Identity finished"
        );
        outcome
    }
}

/// `180` for whole seconds, `1.5` otherwise.
fn whole_or_fractional_secs(duration: Duration) -> String {
    if duration.subsec_nanos() == 0 {
        duration.as_secs().to_string()
    } else {
        duration.as_secs_f64().to_string()
    }
}
