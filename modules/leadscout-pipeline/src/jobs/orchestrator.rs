use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use uuid::Uuid;

use leadscout_common::{Outcome, PipelineSettings};

use super::registry::JobRegistry;
use super::sources::{
    extract_post_id, identity_from_profile_url, identity_from_reactor, normalize_profile_url,
    WorkItem,
};
use crate::pipeline::{DeadlineExecutor, LeadPipeline};
use crate::traits::ReactionSource;

/// Where a job's work list comes from.
enum JobSource {
    /// Known up front (manual profile URLs).
    Items(Vec<WorkItem>),
    /// Fetched in the background from a post's reactions.
    Post(String),
}

/// Submits batch jobs and drives each one to a terminal status on its own task.
///
/// Identities within a job run one at a time, in input order. Separate jobs
/// run concurrently.
#[derive(Clone)]
pub struct BatchOrchestrator {
    registry: JobRegistry,
    executor: DeadlineExecutor,
    reactions: Arc<dyn ReactionSource>,
    max_per_job: usize,
}

impl BatchOrchestrator {
    pub fn new(
        registry: JobRegistry,
        pipeline: Arc<LeadPipeline>,
        reactions: Arc<dyn ReactionSource>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            registry,
            executor: DeadlineExecutor::new(pipeline, settings.profile_timeout),
            reactions,
            max_per_job: settings.max_profiles_per_job,
        }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    /// Start a job over manually supplied profile URLs. Blank entries are
    /// dropped and the rest normalized before the cap applies.
    pub async fn submit_profiles(&self, urls: Vec<String>) -> Uuid {
        let mut urls: Vec<String> = urls
            .iter()
            .filter(|url| !url.trim().is_empty())
            .map(|url| normalize_profile_url(url))
            .collect();
        let submitted = urls.len();
        if submitted > self.max_per_job {
            warn!(submitted, cap = self.max_per_job, "Too many profiles, truncating");
            urls.truncate(self.max_per_job);
        }

        let total = urls.len();
        let items = urls.iter().map(|url| identity_from_profile_url(url)).collect();
        let job_id = self
            .registry
            .create(total, format!("Processing {total} profiles"))
            .await;
        info!(%job_id, total, "Manual profile job submitted");

        self.spawn_job(job_id, JobSource::Items(items));
        job_id
    }

    /// Start a job over everyone who reacted to a post. `post_ref` may be a
    /// full post URL.
    pub async fn submit_post(&self, post_ref: &str) -> Uuid {
        let post_id = extract_post_id(post_ref);
        let job_id = self.registry.create(0, "Fetching post reactions...").await;
        info!(%job_id, post_id = post_id.as_str(), "Post job submitted");

        self.spawn_job(job_id, JobSource::Post(post_id));
        job_id
    }

    /// Run the job detached. A second task watches it so that an error or a
    /// panic still lands in the registry as `failed`.
    fn spawn_job(&self, job_id: Uuid, source: JobSource) {
        let this = self.clone();
        let registry = self.registry.clone();
        let work = tokio::spawn(async move { this.run_job(job_id, source).await });

        tokio::spawn(async move {
            match work.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(%job_id, error = %e, "Job failed");
                    registry.fail(job_id, format!("{e:#}")).await;
                }
                Err(join_error) => {
                    error!(%job_id, error = %join_error, "Job task died");
                    registry
                        .fail(job_id, format!("Job task ended unexpectedly: {join_error}"))
                        .await;
                }
            }
        });
    }

    async fn run_job(&self, job_id: Uuid, source: JobSource) -> Result<()> {
        let items = match source {
            JobSource::Items(items) => items,
            JobSource::Post(post_id) => self.fetch_reactors(job_id, &post_id).await?,
        };

        let (successful, skipped) = self.process_items(job_id, items).await;
        self.registry.complete(job_id).await;
        info!(%job_id, successful, skipped, "Job completed");
        Ok(())
    }

    async fn fetch_reactors(&self, job_id: Uuid, post_id: &str) -> Result<Vec<WorkItem>> {
        let mut reactors = self
            .reactions
            .reactions(post_id)
            .await
            .context("Failed to fetch post reactions")?;

        let found = reactors.len();
        if found > self.max_per_job {
            warn!(%job_id, found, cap = self.max_per_job, "Too many reactors, truncating");
            reactors.truncate(self.max_per_job);
        }
        let total = reactors.len();
        self.registry
            .set_total(job_id, total, format!("Found {found} reactors, processing {total}"))
            .await;
        info!(%job_id, found, total, "Reactors fetched");

        Ok(reactors.into_iter().map(identity_from_reactor).collect())
    }

    /// Sequential loop. Progress advances before each item; the outcome is
    /// appended right after, so `recorded <= current` holds at every read.
    async fn process_items(&self, job_id: Uuid, items: Vec<WorkItem>) -> (usize, usize) {
        let total = items.len();
        let mut successful = 0;
        let mut skipped = 0;

        for (idx, item) in items.into_iter().enumerate() {
            let position = idx + 1;
            self.registry
                .begin_item(
                    job_id,
                    position,
                    format!(
                        "Processing {position}/{total}: {} ({successful} successful, {skipped} skipped)",
                        item.label()
                    ),
                )
                .await;

            let outcome = match item {
                WorkItem::Ready(identity) => self.executor.run(&identity).await,
                WorkItem::Rejected(skip) => {
                    warn!(%job_id, url = skip.profile_url.as_str(), reason = skip.reason.as_str(), "Rejected before processing");
                    Outcome::Skip(skip)
                }
            };

            if outcome.is_lead() {
                successful += 1;
            } else {
                skipped += 1;
            }
            self.registry.record(job_id, outcome).await;
        }

        (successful, skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[tokio::test]
    async fn reactor_fetch_reports_found_and_capped_counts() {
        let reactors = ["aaa", "bbb", "ccc"].iter().map(|h| reactor(h, h)).collect();
        let world = MockWorld::new(MockProfiles::new())
            .with_reactions(MockReactions::new().on_post("42", reactors));
        let registry = JobRegistry::new();
        let settings = PipelineSettings {
            max_profiles_per_job: 2,
            ..PipelineSettings::default()
        };
        let orchestrator = world.orchestrator(registry.clone(), settings);
        let job_id = registry.create(0, "Fetching post reactions...").await;

        let items = orchestrator.fetch_reactors(job_id, "42").await.unwrap();

        assert_eq!(items.len(), 2);
        let view = registry.status(job_id).await.unwrap();
        assert_eq!(view.progress.total, 2);
        assert_eq!(view.progress.message, "Found 3 reactors, processing 2");
    }
}
