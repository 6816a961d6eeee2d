// Trait abstractions for every external collaborator the pipeline calls.
//
// ReactionSource:     who reacted to a post
// ProfileLookup:      raw profile payload for a profile URL
// OrganizationLookup: raw organization payload (one per provider in the fallback chain)
// SummaryGenerator:   narrative summaries of raw payloads
// FitEvaluator:       fit-strength verdict from the two summaries
// FitValidator:       free-form second opinion on a verdict
//
// Production impls live in `infra`; mocks in `testing`.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use leadscout_common::{FitVerdict, Reactor, SummaryKind};

#[async_trait]
pub trait ReactionSource: Send + Sync {
    /// Everyone who reacted to the post, in provider order.
    async fn reactions(&self, post_id: &str) -> Result<Vec<Reactor>>;
}

#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// Raw profile payload. `Ok(None)` when the provider has nothing.
    async fn profile(&self, profile_url: &str) -> Result<Option<Value>>;
}

#[async_trait]
pub trait OrganizationLookup: Send + Sync {
    /// Provider name for logs.
    fn provider(&self) -> &str;

    /// Raw organization payload. `Ok(None)` when the provider has nothing.
    async fn organization(&self, reference: &str) -> Result<Option<Value>>;
}

#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn summarize(&self, kind: SummaryKind, raw: &Value) -> Result<String>;
}

#[async_trait]
pub trait FitEvaluator: Send + Sync {
    async fn evaluate(&self, profile_summary: &str, organization_summary: &str)
        -> Result<FitVerdict>;
}

#[async_trait]
pub trait FitValidator: Send + Sync {
    /// Raw, unstructured model output. Parsed by `extraction::extract_verdict`.
    async fn validate(
        &self,
        profile_summary: &str,
        organization_summary: &str,
        verdict: &FitVerdict,
    ) -> Result<String>;
}
