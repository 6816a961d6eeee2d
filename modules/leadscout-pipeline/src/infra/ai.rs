// Generation collaborators backed by OpenAI-compatible endpoints.
//
// Summaries and validation run against Groq; fit evaluation uses the OpenAI
// Responses API with a reasoning effort.

use ai_client::{strip_code_blocks, ChatOptions, OpenAi};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use leadscout_common::{FitVerdict, SummaryKind};

use crate::prompts;
use crate::traits::{FitEvaluator, FitValidator, SummaryGenerator};

const SUMMARY_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.3,
    max_tokens: 10_000,
};

const VALIDATION_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.2,
    max_tokens: 15_000,
};

pub struct GroqSummarizer {
    llm: OpenAi,
}

impl GroqSummarizer {
    pub fn new(llm: OpenAi) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SummaryGenerator for GroqSummarizer {
    async fn summarize(&self, kind: SummaryKind, raw: &Value) -> Result<String> {
        let summary = self
            .llm
            .chat_completion_with(
                prompts::summary_system_prompt(kind),
                prompts::summary_user_prompt(kind, raw),
                SUMMARY_OPTIONS,
            )
            .await
            .with_context(|| format!("{kind} summary via {}", self.llm.model()))?;
        debug!(%kind, len = summary.len(), "Summary generated");
        Ok(summary)
    }
}

pub struct ReasoningFitEvaluator {
    llm: OpenAi,
    effort: String,
}

impl ReasoningFitEvaluator {
    pub fn new(llm: OpenAi, effort: impl Into<String>) -> Self {
        Self {
            llm,
            effort: effort.into(),
        }
    }
}

#[async_trait]
impl FitEvaluator for ReasoningFitEvaluator {
    async fn evaluate(&self, profile_summary: &str, organization_summary: &str) -> Result<FitVerdict> {
        let prompt = prompts::fit_evaluation_prompt(profile_summary, organization_summary);
        let text = self.llm.reason(prompt, &self.effort).await?;
        let verdict: FitVerdict = serde_json::from_str(strip_code_blocks(&text))
            .with_context(|| format!("Fit evaluation was not valid JSON: {text}"))?;
        debug!(strength = %verdict.strength, "Fit evaluated");
        Ok(verdict)
    }
}

pub struct GroqFitValidator {
    llm: OpenAi,
}

impl GroqFitValidator {
    pub fn new(llm: OpenAi) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl FitValidator for GroqFitValidator {
    async fn validate(
        &self,
        profile_summary: &str,
        organization_summary: &str,
        verdict: &FitVerdict,
    ) -> Result<String> {
        self.llm
            .chat_completion_with(
                prompts::VALIDATION_SYSTEM,
                prompts::validation_prompt(profile_summary, organization_summary, verdict),
                VALIDATION_OPTIONS,
            )
            .await
    }
}
