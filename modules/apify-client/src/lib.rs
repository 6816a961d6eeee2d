pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{
    CompanyDetailInput, CompanyScraperInput, PostReaction, PostReactionsInput,
    ProfileScraperInput, Reactor,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for apimaestro/linkedin-post-reactions.
const POST_REACTIONS: &str = "apimaestro~linkedin-post-reactions";

/// Actor ID for dev_fusion/linkedin-profile-scraper.
const PROFILE_SCRAPER: &str = "dev_fusion~linkedin-profile-scraper";

/// Actor ID for logical_scrapers/linkedin-company-scraper.
const COMPANY_SCRAPER: &str = "logical_scrapers~linkedin-company-scraper";

/// Actor ID for apimaestro/linkedin-company-detail.
const COMPANY_DETAIL: &str = "apimaestro~linkedin-company-detail";

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Run an actor synchronously and return its dataset items in one call.
    pub async fn run_actor_sync<I, T>(&self, actor: &str, input: &I) -> Result<Vec<T>>
    where
        I: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!(
            "{}/acts/{}/run-sync-get-dataset-items",
            self.base_url, actor
        );
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let items: Vec<T> = resp.json().await?;
        tracing::debug!(actor, count = items.len(), "Actor run returned items");
        Ok(items)
    }

    /// Fetch everyone who reacted to a post.
    pub async fn fetch_post_reactions(&self, post_id: &str) -> Result<Vec<PostReaction>> {
        let input = PostReactionsInput {
            post_url: post_id.to_string(),
            page_number: 1,
        };
        let reactions: Vec<PostReaction> = self.run_actor_sync(POST_REACTIONS, &input).await?;
        tracing::info!(post_id, count = reactions.len(), "Fetched post reactions");
        Ok(reactions)
    }

    /// Fetch the raw profile record for a profile URL. `None` when the actor returns nothing.
    pub async fn fetch_profile(&self, profile_url: &str) -> Result<Option<Value>> {
        let input = ProfileScraperInput {
            profile_urls: vec![profile_url.to_string()],
        };
        let items: Vec<Value> = self.run_actor_sync(PROFILE_SCRAPER, &input).await?;
        Ok(first_item(items))
    }

    /// Fetch a company via the primary scraper (flat field layout).
    pub async fn fetch_company_primary(&self, company_url: &str) -> Result<Option<Value>> {
        let input = CompanyScraperInput {
            url: vec![company_url.to_string()],
        };
        let items: Vec<Value> = self.run_actor_sync(COMPANY_SCRAPER, &input).await?;
        Ok(first_item(items))
    }

    /// Fetch a company via the backup detail actor (nested `basic_info` layout).
    pub async fn fetch_company_backup(&self, identifier: &str) -> Result<Option<Value>> {
        let input = CompanyDetailInput {
            identifier: vec![identifier.to_string()],
        };
        let items: Vec<Value> = self.run_actor_sync(COMPANY_DETAIL, &input).await?;
        Ok(first_item(items))
    }
}

/// First dataset item, treating `null` and `{}` as nothing returned.
fn first_item(items: Vec<Value>) -> Option<Value> {
    items.into_iter().next().filter(|item| match item {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    })
}
