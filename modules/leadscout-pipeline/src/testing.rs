// Test mocks for the lead pipeline.
//
// One mock per collaborator trait:
// - MockReactions (ReactionSource): post id → reactor list
// - MockProfiles (ProfileLookup): URL → scripted behavior (found / hang / fail / delay / panic)
// - MockOrganizations (OrganizationLookup): reference → payload, or a blanket failure/hang
// - MockSummarizer (SummaryGenerator): deterministic text, optional per-kind failure
// - MockEvaluator (FitEvaluator): fixed verdict or failure
// - MockValidator (FitValidator): fixed raw text or failure
//
// Every mock records its calls. `MockWorld` bundles one of each and builds the
// real LeadPipeline / BatchOrchestrator on top of them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use leadscout_common::{FitStrength, FitVerdict, Identity, PipelineSettings, Reactor, SummaryKind};

use crate::enrichment::OrganizationChain;
use crate::jobs::{BatchOrchestrator, JobRegistry};
use crate::pipeline::LeadPipeline;
use crate::traits::{
    FitEvaluator, FitValidator, OrganizationLookup, ProfileLookup, ReactionSource,
    SummaryGenerator,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn profile_url(handle: &str) -> String {
    format!("https://www.linkedin.com/in/{handle}")
}

pub fn identity(handle: &str) -> Identity {
    Identity::new(handle, handle, profile_url(handle))
}

pub fn reactor(handle: &str, name: &str) -> Reactor {
    Reactor {
        urn: Some(format!("urn:li:person:{handle}")),
        name: Some(name.to_string()),
        profile_url: Some(profile_url(handle)),
    }
}

/// Profile payload in the profile scraper's flat layout.
pub fn profile_json(full_name: &str, company_ref: Option<&str>, company_name: Option<&str>) -> Value {
    let mut profile = json!({
        "fullName": full_name,
        "headline": format!("Founder at {}", company_name.unwrap_or("Stealth")),
        "email": format!("{}@example.com", full_name.to_lowercase().replace(' ', ".")),
    });
    if let Some(reference) = company_ref {
        profile["companyLinkedin"] = json!(reference);
    }
    if let Some(name) = company_name {
        profile["companyName"] = json!(name);
    }
    profile
}

// ---------------------------------------------------------------------------
// MockReactions
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockReactions {
    posts: HashMap<String, Vec<Reactor>>,
    failure: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockReactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_post(mut self, post_id: &str, reactors: Vec<Reactor>) -> Self {
        self.posts.insert(post_id.to_string(), reactors);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReactionSource for MockReactions {
    async fn reactions(&self, post_id: &str) -> Result<Vec<Reactor>> {
        self.calls.lock().unwrap().push(post_id.to_string());
        if let Some(message) = &self.failure {
            bail!("{message}");
        }
        Ok(self.posts.get(post_id).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// MockProfiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum ProfileBehavior {
    Found(Value),
    Delay(Duration, Value),
    Hang,
    Fail(String),
    Panic,
}

/// URL-keyed profile lookup. Unregistered URLs return `Ok(None)`.
#[derive(Default)]
pub struct MockProfiles {
    behaviors: HashMap<String, ProfileBehavior>,
    calls: Mutex<Vec<String>>,
}

impl MockProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, url: &str, profile: Value) -> Self {
        self.behave(url, ProfileBehavior::Found(profile))
    }

    pub fn delayed(self, url: &str, delay: Duration, profile: Value) -> Self {
        self.behave(url, ProfileBehavior::Delay(delay, profile))
    }

    pub fn hang(self, url: &str) -> Self {
        self.behave(url, ProfileBehavior::Hang)
    }

    pub fn fail(self, url: &str, message: &str) -> Self {
        self.behave(url, ProfileBehavior::Fail(message.to_string()))
    }

    pub fn panic_on(self, url: &str) -> Self {
        self.behave(url, ProfileBehavior::Panic)
    }

    fn behave(mut self, url: &str, behavior: ProfileBehavior) -> Self {
        self.behaviors.insert(url.to_string(), behavior);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileLookup for MockProfiles {
    async fn profile(&self, profile_url: &str) -> Result<Option<Value>> {
        self.calls.lock().unwrap().push(profile_url.to_string());
        match self.behaviors.get(profile_url).cloned() {
            None => Ok(None),
            Some(ProfileBehavior::Found(profile)) => Ok(Some(profile)),
            Some(ProfileBehavior::Delay(delay, profile)) => {
                tokio::time::sleep(delay).await;
                Ok(Some(profile))
            }
            Some(ProfileBehavior::Hang) => {
                std::future::pending::<()>().await;
                Ok(None)
            }
            Some(ProfileBehavior::Fail(message)) => bail!("{message}"),
            Some(ProfileBehavior::Panic) => panic!("profile provider blew up on {profile_url}"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockOrganizations
// ---------------------------------------------------------------------------

pub struct MockOrganizations {
    name: String,
    payloads: HashMap<String, Value>,
    failure: Option<String>,
    hang: bool,
    calls: Mutex<Vec<String>>,
}

impl MockOrganizations {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            payloads: HashMap::new(),
            failure: None,
            hang: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, reference: &str, payload: Value) -> Self {
        self.payloads.insert(reference.to_string(), payload);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrganizationLookup for MockOrganizations {
    fn provider(&self) -> &str {
        &self.name
    }

    async fn organization(&self, reference: &str) -> Result<Option<Value>> {
        self.calls.lock().unwrap().push(reference.to_string());
        if self.hang {
            std::future::pending::<()>().await;
        }
        if let Some(message) = &self.failure {
            bail!("{message}");
        }
        Ok(self.payloads.get(reference).cloned())
    }
}

// ---------------------------------------------------------------------------
// MockSummarizer
// ---------------------------------------------------------------------------

/// Returns `"<kind> summary: <name>"`, where name is read from the payload.
#[derive(Default)]
pub struct MockSummarizer {
    failing: Vec<SummaryKind>,
    calls: Mutex<Vec<SummaryKind>>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(mut self, kind: SummaryKind) -> Self {
        self.failing.push(kind);
        self
    }

    pub fn calls(&self) -> Vec<SummaryKind> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryGenerator for MockSummarizer {
    async fn summarize(&self, kind: SummaryKind, raw: &Value) -> Result<String> {
        self.calls.lock().unwrap().push(kind);
        if self.failing.contains(&kind) {
            bail!("{kind} model unavailable");
        }
        let name = raw
            .get("fullName")
            .or_else(|| raw.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("unnamed");
        Ok(format!("{kind} summary: {name}"))
    }
}

// ---------------------------------------------------------------------------
// MockEvaluator
// ---------------------------------------------------------------------------

pub struct MockEvaluator {
    verdict: Option<FitVerdict>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockEvaluator {
    pub fn new(verdict: FitVerdict) -> Self {
        Self {
            verdict: Some(verdict),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            verdict: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockEvaluator {
    fn default() -> Self {
        Self::new(FitVerdict {
            strength: FitStrength::High,
            reason: "Runs a voice automation agency".to_string(),
        })
    }
}

#[async_trait]
impl FitEvaluator for MockEvaluator {
    async fn evaluate(&self, profile_summary: &str, organization_summary: &str) -> Result<FitVerdict> {
        self.calls
            .lock()
            .unwrap()
            .push((profile_summary.to_string(), organization_summary.to_string()));
        match &self.verdict {
            Some(verdict) => Ok(verdict.clone()),
            None => bail!("reasoning service returned 500"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockValidator
// ---------------------------------------------------------------------------

pub struct MockValidator {
    response: Option<String>,
    calls: Mutex<Vec<FitVerdict>>,
}

impl MockValidator {
    /// Respond with `text` verbatim.
    pub fn new(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<FitVerdict> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockValidator {
    fn default() -> Self {
        Self::new(r#"{"validation_judgement": "Correct", "validation_reason": "Agency founder"}"#)
    }
}

#[async_trait]
impl FitValidator for MockValidator {
    async fn validate(
        &self,
        _profile_summary: &str,
        _organization_summary: &str,
        verdict: &FitVerdict,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(verdict.clone());
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => bail!("validation model overloaded"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockWorld
// ---------------------------------------------------------------------------

/// One mock per collaborator, shared with the pipeline so tests can inspect
/// calls after running it.
pub struct MockWorld {
    pub reactions: Arc<MockReactions>,
    pub profiles: Arc<MockProfiles>,
    pub primary: Arc<MockOrganizations>,
    pub backup: Arc<MockOrganizations>,
    pub summarizer: Arc<MockSummarizer>,
    pub evaluator: Arc<MockEvaluator>,
    pub validator: Arc<MockValidator>,
}

impl MockWorld {
    pub fn new(profiles: MockProfiles) -> Self {
        Self {
            reactions: Arc::new(MockReactions::new()),
            profiles: Arc::new(profiles),
            primary: Arc::new(MockOrganizations::new("primary")),
            backup: Arc::new(MockOrganizations::new("backup")),
            summarizer: Arc::new(MockSummarizer::new()),
            evaluator: Arc::new(MockEvaluator::default()),
            validator: Arc::new(MockValidator::default()),
        }
    }

    pub fn with_reactions(mut self, reactions: MockReactions) -> Self {
        self.reactions = Arc::new(reactions);
        self
    }

    pub fn with_primary(mut self, primary: MockOrganizations) -> Self {
        self.primary = Arc::new(primary);
        self
    }

    pub fn with_backup(mut self, backup: MockOrganizations) -> Self {
        self.backup = Arc::new(backup);
        self
    }

    pub fn with_summarizer(mut self, summarizer: MockSummarizer) -> Self {
        self.summarizer = Arc::new(summarizer);
        self
    }

    pub fn with_evaluator(mut self, evaluator: MockEvaluator) -> Self {
        self.evaluator = Arc::new(evaluator);
        self
    }

    pub fn with_validator(mut self, validator: MockValidator) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    pub fn pipeline(&self) -> LeadPipeline {
        LeadPipeline::builder()
            .profiles(self.profiles.clone())
            .organizations(OrganizationChain::new(self.primary.clone(), self.backup.clone()))
            .summarizer(self.summarizer.clone())
            .evaluator(self.evaluator.clone())
            .validator(self.validator.clone())
            .build()
    }

    pub fn orchestrator(&self, registry: JobRegistry, settings: PipelineSettings) -> BatchOrchestrator {
        BatchOrchestrator::new(
            registry,
            Arc::new(self.pipeline()),
            self.reactions.clone(),
            settings,
        )
    }
}
