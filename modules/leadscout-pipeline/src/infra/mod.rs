pub mod ai;
pub mod apify;

use std::sync::Arc;

use ai_client::OpenAi;
use apify_client::ApifyClient;

use leadscout_common::Config;

use crate::enrichment::OrganizationChain;
use crate::jobs::{BatchOrchestrator, JobRegistry};
use crate::pipeline::LeadPipeline;

pub use ai::{GroqFitValidator, GroqSummarizer, ReasoningFitEvaluator};
pub use apify::{ApifyCompanyDetail, ApifyCompanyScraper, ApifyProfiles, ApifyReactions};

/// Wire the production collaborators into a stage chain.
pub fn build_pipeline(config: &Config, apify: Arc<ApifyClient>) -> LeadPipeline {
    let groq = groq_client(config);

    LeadPipeline::builder()
        .profiles(Arc::new(ApifyProfiles::new(apify.clone())))
        .organizations(OrganizationChain::new(
            Arc::new(ApifyCompanyScraper::new(apify.clone())),
            Arc::new(ApifyCompanyDetail::new(apify)),
        ))
        .summarizer(Arc::new(GroqSummarizer::new(groq.clone())))
        .evaluator(Arc::new(ReasoningFitEvaluator::new(
            OpenAi::new(config.openai_api_key.clone(), config.evaluation_model.clone()),
            config.reasoning_effort.clone(),
        )))
        .validator(Arc::new(GroqFitValidator::new(
            groq.with_model(config.validation_model.clone()),
        )))
        .build()
}

/// Groq client on the summary model. The validator swaps in its own model.
fn groq_client(config: &Config) -> OpenAi {
    let client = OpenAi::groq(config.groq_api_key.clone(), config.summary_model.clone());
    match &config.groq_base_url {
        Some(url) => client.with_base_url(url.clone()),
        None => client,
    }
}

/// Production orchestrator over a fresh Apify client.
pub fn build_orchestrator(config: &Config, registry: JobRegistry) -> BatchOrchestrator {
    let apify = Arc::new(ApifyClient::new(config.apify_token.clone()));
    let pipeline = build_pipeline(config, apify.clone());
    BatchOrchestrator::new(
        registry,
        Arc::new(pipeline),
        Arc::new(ApifyReactions::new(apify)),
        config.pipeline,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_common::PipelineSettings;

    fn config(groq_base_url: Option<&str>) -> Config {
        Config {
            apify_token: "apify".into(),
            openai_api_key: "sk".into(),
            groq_api_key: "gsk".into(),
            groq_base_url: groq_base_url.map(String::from),
            summary_model: "llama-3.3-70b-versatile".into(),
            evaluation_model: "gpt-5-mini".into(),
            validation_model: "openai/gpt-oss-20b".into(),
            reasoning_effort: "high".into(),
            pipeline: PipelineSettings::default(),
            api_host: "localhost".into(),
            api_port: 8000,
        }
    }

    #[test]
    fn groq_client_starts_on_summary_model() {
        let client = groq_client(&config(None));
        assert_eq!(client.model(), "llama-3.3-70b-versatile");
        assert_eq!(client.with_model("openai/gpt-oss-20b").model(), "openai/gpt-oss-20b");
    }
}
