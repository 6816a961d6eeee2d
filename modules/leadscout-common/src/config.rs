use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Per-identity deadline used when nothing is configured.
pub const DEFAULT_PROFILE_TIMEOUT_SECS: u64 = 180;

/// Hard cap on identities processed per job.
pub const DEFAULT_MAX_PROFILES_PER_JOB: usize = 100;

/// Knobs the batch engine needs. Independent of any credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub profile_timeout: Duration,
    pub max_profiles_per_job: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            profile_timeout: Duration::from_secs(DEFAULT_PROFILE_TIMEOUT_SECS),
            max_profiles_per_job: DEFAULT_MAX_PROFILES_PER_JOB,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Lookups
    pub apify_token: String,

    // Generation
    pub openai_api_key: String,
    pub groq_api_key: String,
    /// Overrides the client's built-in Groq endpoint when set.
    pub groq_base_url: Option<String>,
    pub summary_model: String,
    pub evaluation_model: String,
    pub validation_model: String,
    pub reasoning_effort: String,

    // Batch engine
    pub pipeline: PipelineSettings,

    // Web server
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let profile_timeout_secs: u64 =
            parse_env("PROFILE_TIMEOUT_SECONDS", DEFAULT_PROFILE_TIMEOUT_SECS)?;
        let max_profiles_per_job: usize =
            parse_env("MAX_PROFILES_PER_JOB", DEFAULT_MAX_PROFILES_PER_JOB)?;

        let config = Self {
            apify_token: required_env("APIFY_TOKEN")?,
            openai_api_key: required_env("OPENAI_API_KEY")?,
            groq_api_key: required_env("GROQ_API_KEY")?,
            groq_base_url: env::var("GROQ_BASE_URL").ok().filter(|url| !url.trim().is_empty()),
            summary_model: env::var("SUMMARY_MODEL")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            evaluation_model: env::var("EVALUATION_MODEL")
                .unwrap_or_else(|_| "gpt-5-mini".to_string()),
            validation_model: env::var("VALIDATION_MODEL")
                .unwrap_or_else(|_| "openai/gpt-oss-20b".to_string()),
            reasoning_effort: env::var("REASONING_EFFORT").unwrap_or_else(|_| "high".to_string()),
            pipeline: PipelineSettings {
                profile_timeout: Duration::from_secs(profile_timeout_secs),
                max_profiles_per_job,
            },
            api_host: env::var("API_HOST").unwrap_or_else(|_| "localhost".to_string()),
            api_port: parse_env("API_PORT", 8000)?,
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val
                .char_indices()
                .nth(5)
                .map(|(i, _)| i)
                .unwrap_or(val.len());
            format!("{}...({} chars)", &val[..n], val.len())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  APIFY_TOKEN: {}", preview(&self.apify_token));
        tracing::info!("  OPENAI_API_KEY: {}", preview(&self.openai_api_key));
        tracing::info!("  GROQ_API_KEY: {}", preview(&self.groq_api_key));
        tracing::info!(
            timeout_secs = self.pipeline.profile_timeout.as_secs(),
            max_profiles = self.pipeline.max_profiles_per_job,
            "  Pipeline settings"
        );
    }
}

fn required_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} environment variable is required"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
