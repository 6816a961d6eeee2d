use serde::{Deserialize, Serialize};

// --- Post reactions ---

/// Input for the apimaestro/linkedin-post-reactions actor.
#[derive(Debug, Clone, Serialize)]
pub struct PostReactionsInput {
    pub post_url: String,
    pub page_number: u32,
}

/// A single reaction from the post-reactions dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostReaction {
    #[serde(default)]
    pub reactor: Option<Reactor>,
    #[serde(default)]
    pub reaction_type: Option<String>,
}

/// The person who reacted to a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Reactor {
    pub urn: Option<String>,
    pub name: Option<String>,
    pub profile_url: Option<String>,
    pub headline: Option<String>,
}

// --- Profile scraper ---

/// Input for the dev_fusion/linkedin-profile-scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileScraperInput {
    #[serde(rename = "profileUrls")]
    pub profile_urls: Vec<String>,
}

// --- Company scrapers ---

/// Input for the logical_scrapers/linkedin-company-scraper actor (primary).
#[derive(Debug, Clone, Serialize)]
pub struct CompanyScraperInput {
    pub url: Vec<String>,
}

/// Input for the apimaestro/linkedin-company-detail actor (backup).
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetailInput {
    pub identifier: Vec<String>,
}
