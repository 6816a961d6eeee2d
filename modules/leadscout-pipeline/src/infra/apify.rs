// Apify-backed lookups. One thin adapter per actor; all share one client.

use std::sync::Arc;

use anyhow::Result;
use apify_client::ApifyClient;
use async_trait::async_trait;
use serde_json::Value;

use leadscout_common::Reactor;

use crate::traits::{OrganizationLookup, ProfileLookup, ReactionSource};

pub struct ApifyReactions {
    client: Arc<ApifyClient>,
}

impl ApifyReactions {
    pub fn new(client: Arc<ApifyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReactionSource for ApifyReactions {
    async fn reactions(&self, post_id: &str) -> Result<Vec<Reactor>> {
        let items = self.client.fetch_post_reactions(post_id).await?;
        // Items without a reactor still count; they become skips downstream.
        Ok(items
            .into_iter()
            .map(|item| {
                let reactor = item.reactor.unwrap_or_default();
                Reactor {
                    urn: reactor.urn,
                    name: reactor.name,
                    profile_url: reactor.profile_url,
                }
            })
            .collect())
    }
}

pub struct ApifyProfiles {
    client: Arc<ApifyClient>,
}

impl ApifyProfiles {
    pub fn new(client: Arc<ApifyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileLookup for ApifyProfiles {
    async fn profile(&self, profile_url: &str) -> Result<Option<Value>> {
        Ok(self.client.fetch_profile(profile_url).await?)
    }
}

/// Primary organization provider: the company scraper, keyed by company URL.
pub struct ApifyCompanyScraper {
    client: Arc<ApifyClient>,
}

impl ApifyCompanyScraper {
    pub fn new(client: Arc<ApifyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrganizationLookup for ApifyCompanyScraper {
    fn provider(&self) -> &str {
        "apify_company_scraper"
    }

    async fn organization(&self, reference: &str) -> Result<Option<Value>> {
        Ok(self.client.fetch_company_primary(reference).await?)
    }
}

/// Backup organization provider: the company detail actor. Nested layout.
pub struct ApifyCompanyDetail {
    client: Arc<ApifyClient>,
}

impl ApifyCompanyDetail {
    pub fn new(client: Arc<ApifyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrganizationLookup for ApifyCompanyDetail {
    fn provider(&self) -> &str {
        "apify_company_detail"
    }

    async fn organization(&self, reference: &str) -> Result<Option<Value>> {
        Ok(self.client.fetch_company_backup(reference).await?)
    }
}
